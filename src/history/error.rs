use thiserror::Error;

/// Errors surfaced by the history view to its host.
///
/// Fetch failures are not here: they travel inside a
/// [`FetchCompletion`](super::FetchCompletion) and are absorbed as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// Window index outside the three enumerated windows. Caller contract violation.
    #[error("invalid time window selection: {index} (expected 0, 1 or 2)")]
    InvalidSelection { index: usize },

    /// Row toggle for a row that does not exist (UI/state desync).
    #[error("history row {index} out of range ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}
