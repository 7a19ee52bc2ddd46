//! Renderer module: split into focused submodules.
//!
//! - `header`: Header label, window selector, loading spinner
//! - `history`: The alert history table
//! - `status_bar`: Bottom status bar with keybinds and status message
//! - `helpers`: Shared rendering utilities

mod header;
pub mod helpers;
mod history;
mod status_bar;

use ratatui::Frame;

use super::layout::main_chunks;
use super::state::AppState;

/// Top-level render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let [header_area, list_area, status_area] = main_chunks(frame.area());

    header::render_header(frame, header_area, state);
    history::render_history(frame, list_area, state);
    status_bar::render_status_bar(frame, status_area, state);
}
