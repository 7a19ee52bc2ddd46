use std::fmt;

use chrono::{DateTime, Utc};

/// Severity of a policy alert.
///
/// Sources tag alerts with `"error"`, `"warn"` or `"info"`. Anything else
/// is treated as [`AlertSeverity::Info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertSeverity {
    Error,
    Warn,
    Info,
}

impl AlertSeverity {
    /// Parse a source tag. Unknown tags are logged and mapped to `Info`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "error" => AlertSeverity::Error,
            "warn" => AlertSeverity::Warn,
            "info" => AlertSeverity::Info,
            other => {
                tracing::warn!(tag = other, "unrecognized alert severity, treating as info");
                AlertSeverity::Info
            }
        }
    }

    /// The tag used by sources and the store.
    pub fn as_tag(&self) -> &'static str {
        match self {
            AlertSeverity::Error => "error",
            AlertSeverity::Warn => "warn",
            AlertSeverity::Info => "info",
        }
    }

    /// Info rows carry no detail body worth expanding.
    pub fn is_expandable(&self) -> bool {
        !matches!(self, AlertSeverity::Info)
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A single alert raised by a scheduled policy. Read-only to the history view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub time: DateTime<Utc>,
    /// Short human-readable summary.
    pub short_body: String,
    /// Complete detail text.
    pub full_text: String,
}

impl Alert {
    pub fn new(
        severity: AlertSeverity,
        time: DateTime<Utc>,
        short_body: impl Into<String>,
        full_text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            time,
            short_body: short_body.into(),
            full_text: full_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_known_values() {
        assert_eq!(AlertSeverity::from_tag("error"), AlertSeverity::Error);
        assert_eq!(AlertSeverity::from_tag("warn"), AlertSeverity::Warn);
        assert_eq!(AlertSeverity::from_tag("info"), AlertSeverity::Info);
    }

    #[test]
    fn from_tag_unknown_is_info() {
        assert_eq!(AlertSeverity::from_tag("fatal"), AlertSeverity::Info);
        assert_eq!(AlertSeverity::from_tag(""), AlertSeverity::Info);
        // Tags are case-sensitive
        assert_eq!(AlertSeverity::from_tag("ERROR"), AlertSeverity::Info);
    }

    #[test]
    fn tag_roundtrip() {
        for sev in [AlertSeverity::Error, AlertSeverity::Warn, AlertSeverity::Info] {
            assert_eq!(AlertSeverity::from_tag(sev.as_tag()), sev);
            assert_eq!(sev.to_string(), sev.as_tag());
        }
    }

    #[test]
    fn only_info_is_not_expandable() {
        assert!(AlertSeverity::Error.is_expandable());
        assert!(AlertSeverity::Warn.is_expandable());
        assert!(!AlertSeverity::Info.is_expandable());
    }
}
