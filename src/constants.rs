//! Application-wide constants.
//!
//! Budgets, window hours, timing and path defaults live here so the
//! history core and the terminal host agree on them.

use std::path::PathBuf;

// ── Time windows ──────────────────────────────────────────────────
/// Hours for the default window. Zero asks the source for its recent set.
pub const DEFAULT_WINDOW_HOURS: u32 = 0;
/// Hours for the "last 24 hours" window.
pub const LAST_24H_WINDOW_HOURS: u32 = 24;
/// Hours for the "last 7 days" window.
pub const LAST_7D_WINDOW_HOURS: u32 = 7 * 24;

// ── Row body budgets ──────────────────────────────────────────────
/// Collapsed body budget for error rows (characters).
pub const ERROR_BODY_BUDGET: usize = 80;
/// Collapsed body budget for warn and info rows (characters).
pub const DEFAULT_BODY_BUDGET: usize = 90;
/// Marker appended to ellipsised text.
pub const ELLIPSIS: &str = "...";

// ── Fetching ──────────────────────────────────────────────────────
/// Default fetch timeout (seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Minimum fetch timeout floor (seconds).
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 1;
/// Alerts returned by the store for the default window.
pub const DEFAULT_RECENT_LIMIT: usize = 10;
/// Upper bound for the configured recent limit.
pub const MAX_RECENT_LIMIT: usize = 1000;

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Spinner animation step (ms).
pub const SPINNER_TICK_MS: u64 = 200;
/// Rows moved by PageUp / PageDown.
pub const PAGE_STEP: usize = 10;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

// ── Presentation ──────────────────────────────────────────────────
/// Default date column format (day month year hour:minute).
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y %H:%M";
/// Width reserved for the expand affordance column.
pub const EXPAND_COLUMN_WIDTH: u16 = 3;
/// Width reserved for the status column (icon + text).
pub const STATUS_COLUMN_WIDTH: u16 = 16;
/// Width reserved for the date column.
pub const DATE_COLUMN_WIDTH: u16 = 19;
/// Width reserved for the window selector to the right of the header label.
pub const WINDOW_SELECTOR_WIDTH: u16 = 44;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages for cycling.
pub const LANGUAGES: &[&str] = &["en", "de"];

// ── Logging ───────────────────────────────────────────────────────
/// Project-specific log filter variable, checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "POLICY_HISTORY_LOG";
/// Default log level when neither env var is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log file name under the data directory.
pub const LOG_FILE_NAME: &str = "policy-history.log";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/policy-history/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("policy-history")
}

/// Returns `~/.config/policy-history/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.local/share/policy-history/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("policy-history")
}

/// Returns `~/.local/share/policy-history/alerts.db`.
pub fn default_db_path() -> PathBuf {
    data_dir().join("alerts.db")
}

/// Returns `~/.local/share/policy-history/policy-history.log`.
pub fn log_file_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}
