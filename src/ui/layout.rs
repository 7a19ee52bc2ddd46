//! Screen geometry shared by the renderer and the mouse hit-testing in the app.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::constants::{DATE_COLUMN_WIDTH, EXPAND_COLUMN_WIDTH, STATUS_COLUMN_WIDTH};
use crate::history::render::render_body;
use crate::history::HistoryRowModel;

/// Spacing between table columns.
pub const COLUMN_SPACING: u16 = 1;

/// Split the screen into header, history list and status bar.
pub fn main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header label + window selector
            Constraint::Min(5),    // History list
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// The area where table rows are drawn: inside the border, below the column titles.
pub fn rows_area(screen: Rect) -> Rect {
    let list = main_chunks(screen)[1];
    Rect {
        x: list.x + 1,
        y: list.y + 2,
        width: list.width.saturating_sub(2),
        height: list.height.saturating_sub(3),
    }
}

/// Width left for the description column in a table of `table_width` columns.
pub fn body_width(table_width: u16) -> usize {
    let fixed = EXPAND_COLUMN_WIDTH + STATUS_COLUMN_WIDTH + DATE_COLUMN_WIDTH + 3 * COLUMN_SPACING;
    table_width.saturating_sub(fixed).max(1) as usize
}

/// Wrap a rendered body into display lines, honoring embedded line breaks.
pub fn wrap_body(body: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for line in body.lines() {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(textwrap::wrap(line, width).into_iter().map(|l| l.into_owned()));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Display height of a row: one line collapsed, the wrapped body when expanded.
pub fn row_height(row: &HistoryRowModel, body_width: usize) -> usize {
    if !row.expanded() {
        return 1;
    }
    wrap_body(&render_body(row.alert(), true), body_width).len()
}

/// Which row occupies display line `line`, counting from the first visible row.
pub fn row_at_line(
    rows: &[HistoryRowModel],
    scroll: usize,
    body_width: usize,
    line: usize,
) -> Option<usize> {
    let mut top = 0;
    for (index, row) in rows.iter().enumerate().skip(scroll) {
        let height = row_height(row, body_width);
        if line < top + height {
            return Some(index);
        }
        top += height;
    }
    None
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::history::testing::alert_at;
    use crate::models::AlertSeverity;

    fn rows() -> Vec<HistoryRowModel> {
        vec![
            HistoryRowModel::new(Arc::new(alert_at(AlertSeverity::Error, 3, "first"))),
            HistoryRowModel::new(Arc::new(alert_at(AlertSeverity::Warn, 2, "second"))),
            HistoryRowModel::new(Arc::new(alert_at(AlertSeverity::Info, 1, "third"))),
        ]
    }

    #[test]
    fn wrap_body_splits_on_newlines_and_width() {
        let lines = wrap_body("short line\nthis one is a bit longer", 10);
        assert_eq!(lines[0], "short line");
        assert!(lines.len() >= 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_body_empty_is_one_line() {
        assert_eq!(wrap_body("", 10), vec![String::new()]);
    }

    #[test]
    fn collapsed_rows_are_one_line() {
        for row in rows() {
            assert_eq!(row_height(&row, 40), 1);
        }
    }

    #[test]
    fn expanded_error_row_spans_summary_and_detail() {
        let mut rows = rows();
        assert!(rows[0].toggle());
        // "first" then "first (details)"
        assert_eq!(row_height(&rows[0], 40), 2);
    }

    #[test]
    fn hit_test_accounts_for_expanded_rows() {
        let mut rows = rows();
        rows[0].toggle();
        assert_eq!(row_at_line(&rows, 0, 40, 0), Some(0));
        assert_eq!(row_at_line(&rows, 0, 40, 1), Some(0));
        assert_eq!(row_at_line(&rows, 0, 40, 2), Some(1));
        assert_eq!(row_at_line(&rows, 0, 40, 3), Some(2));
        assert_eq!(row_at_line(&rows, 0, 40, 4), None);
    }

    #[test]
    fn hit_test_respects_scroll() {
        let rows = rows();
        assert_eq!(row_at_line(&rows, 1, 40, 0), Some(1));
        assert_eq!(row_at_line(&rows, 2, 40, 1), None);
    }

    #[test]
    fn body_width_never_zero() {
        assert_eq!(body_width(0), 1);
        assert_eq!(body_width(100), 100 - 3 - 16 - 19 - 3);
    }

    #[test]
    fn rows_area_sits_inside_list_block() {
        let screen = Rect::new(0, 0, 100, 30);
        let area = rows_area(screen);
        // header (3) + border (1) + column titles (1)
        assert_eq!(area.y, 5);
        assert_eq!(area.width, 98);
    }
}
