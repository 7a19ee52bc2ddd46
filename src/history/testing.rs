//! Shared fixtures for history and source tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Alert, AlertSeverity, PolicyId};
use crate::source::{AlertSource, FetchError};

use super::render::{HistoryResources, IconKind, StatusLabel};

/// Epoch seconds as a UTC timestamp.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

/// Alert at `secs` with a derived detail text.
pub fn alert_at(severity: AlertSeverity, secs: i64, short: &str) -> Alert {
    Alert::new(severity, ts(secs), short, format!("{} (details)", short))
}

/// English strings and ASCII icons, so render output is easy to assert on.
pub struct PlainResources;

impl HistoryResources for PlainResources {
    type Icon = &'static str;

    fn icon(&self, kind: IconKind) -> Self::Icon {
        match kind {
            IconKind::Warning => "!",
            IconKind::Success => "v",
            IconKind::Expanded => "v",
            IconKind::Collapsed => ">",
        }
    }

    fn status_text(&self, label: StatusLabel) -> String {
        match label {
            StatusLabel::Error => "Error",
            StatusLabel::Warning => "Warning",
            StatusLabel::Information => "Information",
        }
        .to_string()
    }

    fn header_text(&self, policy_name: &str) -> String {
        format!("History for {}", policy_name)
    }
}

/// Alert source answering from a fixed table, recording every call.
#[derive(Default)]
pub struct ScriptedSource {
    answers: HashMap<(String, u32), Vec<Alert>>,
    failing: bool,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, policy: &str, hours: u32, alerts: Vec<Alert>) -> Self {
        self.answers.insert((policy.to_string(), hours), alerts);
        self
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl AlertSource for ScriptedSource {
    fn get_alerts(&self, policy: &PolicyId, hours_from_now: u32) -> Result<Vec<Alert>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((policy.as_str().to_string(), hours_from_now));
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing {
            return Err(FetchError::Source("backend unavailable".to_string()));
        }
        Ok(self
            .answers
            .get(&(policy.as_str().to_string(), hours_from_now))
            .cloned()
            .unwrap_or_default())
    }
}
