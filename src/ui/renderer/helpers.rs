//! Shared rendering helpers: date formatting, scrollbar.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Format an alert timestamp in local time.
pub fn format_time(time: DateTime<Utc>, format: &str) -> String {
    time.with_timezone(&Local).format(format).to_string()
}

/// Render a vertical scrollbar inside a bordered area (1px vertical margin).
///
/// Only renders if `total > visible`.
pub fn render_scrollbar_bordered(
    frame: &mut Frame,
    area: Rect,
    total: usize,
    visible: usize,
    position: usize,
) {
    if total <= visible {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
