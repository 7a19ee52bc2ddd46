//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so logs go to a file under the data
//! directory. Filter priority, highest first:
//!
//! 1. `POLICY_HISTORY_LOG` env var
//! 2. `RUST_LOG` env var
//! 3. `--verbose` (debug) or the default level (info)

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Normal,
    /// `--verbose` / `-v`: debug-level output.
    Verbose,
}

impl Verbosity {
    pub const fn from_flag(verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    fn default_directive(self) -> String {
        match self {
            Self::Normal => DEFAULT_LOG_LEVEL.to_string(),
            Self::Verbose => format!("{},policy_history=debug", DEFAULT_LOG_LEVEL),
        }
    }
}

/// Install the global subscriber, appending to `log_path`.
///
/// Call once, before config loading, so config warnings are captured.
pub fn init_subscriber(verbosity: Verbosity, log_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .init();
    Ok(())
}

/// Build an `EnvFilter` respecting the priority chain. Unparsable env values
/// fall through to the next source.
fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    let project = std::env::var(LOG_ENV_VAR).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(project.as_deref(), rust_log.as_deref(), verbosity)
}

fn filter_from(project: Option<&str>, rust_log: Option<&str>, verbosity: Verbosity) -> EnvFilter {
    for directives in [project, rust_log].into_iter().flatten() {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    EnvFilter::try_new(verbosity.default_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flag() {
        assert_eq!(Verbosity::from_flag(false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flag(true), Verbosity::Verbose);
    }

    #[test]
    fn project_var_wins() {
        let filter = filter_from(Some("warn"), Some("trace"), Verbosity::Verbose);
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn rust_log_used_when_project_var_unset() {
        let filter = filter_from(None, Some("error"), Verbosity::Normal);
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn invalid_directive_falls_through() {
        let filter = filter_from(Some("policy_history=loud"), None, Verbosity::Normal);
        assert_eq!(filter.to_string(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn verbose_enables_crate_debug() {
        let filter = filter_from(None, None, Verbosity::Verbose);
        assert!(filter.to_string().contains("policy_history=debug"));
    }
}
