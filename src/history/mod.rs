//! Policy alert history: window selection, fetch lifecycle, row state and
//! the pure row renderer.
//!
//! - `window`: the three time windows and their selector
//! - `row`: per-alert expand/collapse state
//! - `controller`: selection → fetch → populate → sort, row toggling
//! - `fetch`: request/completion pair exchanged with the fetch dispatcher
//! - `render`: display rules, consumed through host-supplied resources

mod controller;
mod error;
mod fetch;
pub mod render;
mod row;
mod window;

pub use controller::{FetchOutcome, HistoryListController, RowToggle, ViewPhase};
pub use error::HistoryError;
pub use fetch::{FetchCompletion, FetchRequest};
pub use render::{HistoryResources, IconKind, RenderedRow, StatusLabel};
pub use row::HistoryRowModel;
pub use window::{TimeWindow, TimeWindowSelector, WindowChange};

#[cfg(test)]
pub(crate) mod testing;
