use std::time::Duration;

use crate::models::{Alert, PolicyId};
use crate::source::FetchError;

use super::TimeWindow;

/// A fetch issued by the controller for one (policy, window) combination.
///
/// `generation` increases with every request, so two requests for the same
/// combination are still distinguishable when their results arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub policy: PolicyId,
    pub window: TimeWindow,
}

impl FetchRequest {
    /// Hours-from-now for the alert source; zero means the source's recent set.
    pub fn hours_from_now(&self) -> u32 {
        self.window.hours_from_now()
    }

    pub fn complete(self, result: Result<Vec<Alert>, FetchError>, elapsed: Duration) -> FetchCompletion {
        FetchCompletion {
            request: self,
            result,
            elapsed,
        }
    }
}

/// The resolved result of a [`FetchRequest`], handed back to the controller.
#[derive(Debug)]
pub struct FetchCompletion {
    pub request: FetchRequest,
    pub result: Result<Vec<Alert>, FetchError>,
    pub elapsed: Duration,
}
