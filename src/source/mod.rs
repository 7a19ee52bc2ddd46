//! The alert source seam and the machinery that calls it off the UI thread.

mod dispatch;

use std::time::Duration;

use thiserror::Error;

use crate::models::{Alert, PolicyId};

pub use dispatch::{fetch_blocking, FetchDispatcher};

/// Why an alert fetch produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("alert source failed: {0}")]
    Source(String),

    #[error("alert fetch timed out after {0:?}")]
    TimedOut(Duration),

    #[error("alert fetch worker failed: {0}")]
    Worker(String),
}

/// Anything that can list the alerts raised by a policy.
///
/// Implementations may block; the host runs them on a worker thread.
pub trait AlertSource: Send + Sync {
    /// Alerts for `policy` raised within the last `hours_from_now` hours.
    ///
    /// `hours_from_now` is one of 0, 24 or 168. Zero is not a zero-width
    /// window: it asks for the source's default recent set (its newest N
    /// alerts, with N owned by the source's own configuration).
    fn get_alerts(&self, policy: &PolicyId, hours_from_now: u32) -> Result<Vec<Alert>, FetchError>;
}
