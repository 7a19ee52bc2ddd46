//! History table: one row per alert, newest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::constants::{DATE_COLUMN_WIDTH, EXPAND_COLUMN_WIDTH, STATUS_COLUMN_WIDTH};
use crate::history::render::render_row;
use crate::history::ViewPhase;
use crate::ui::layout::{body_width, wrap_body, COLUMN_SPACING};
use crate::ui::resources::TerminalResources;
use crate::ui::state::AppState;
use crate::utils::loading_dots;

use super::helpers::{format_time, render_scrollbar_bordered};

pub fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let controller = &state.controller;
    let rows = controller.rows();

    let block = Block::default()
        .title(Span::styled(
            t!("history.title", count = rows.len()).to_string(),
            t.header_style(),
        ))
        .borders(Borders::ALL)
        .border_style(t.border_style());

    if rows.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let (text, color) = match controller.phase() {
            ViewPhase::NoPolicy => (t!("history.no_policy").to_string(), t.text_dim),
            ViewPhase::Loading => (
                format!("{}{}", t!("history.loading"), loading_dots(state.tick_count)),
                t.accent,
            ),
            ViewPhase::PolicySet | ViewPhase::Loaded => (t!("history.none").to_string(), t.text_dim),
        };
        let msg = Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled(format!("  {}", text), Style::default().fg(color))),
        ]);
        frame.render_widget(msg, inner);
        return;
    }

    let inner = block.inner(area);
    let width = body_width(inner.width);
    let res = TerminalResources::new(t);

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(t!("history.column.status").to_string()).style(t.table_header_style()),
        Cell::from(t!("history.column.date").to_string()).style(t.table_header_style()),
        Cell::from(t!("history.column.description").to_string()).style(t.table_header_style()),
    ])
    .height(1);

    let visible_lines = inner.height.saturating_sub(1) as usize;
    let mut used = 0;
    let mut table_rows = Vec::new();
    for (i, row) in rows.iter().enumerate().skip(state.scroll) {
        if used >= visible_lines {
            break;
        }
        let rendered = render_row(row, &res);
        let body_lines: Vec<Line> = if row.expanded() {
            wrap_body(&rendered.body, width)
                .into_iter()
                .map(Line::raw)
                .collect()
        } else {
            vec![Line::raw(rendered.body)]
        };
        let height = body_lines.len();
        used += height;

        let style = if i == state.selected_row {
            t.row_selected()
        } else {
            Style::default().fg(t.text_primary)
        };
        let severity = t.severity_style(row.alert().severity);

        table_rows.push(
            Row::new(vec![
                Cell::from(rendered.expand.unwrap_or_else(|| Span::raw(""))),
                Cell::from(Line::from(vec![
                    rendered.icon,
                    Span::raw(" "),
                    Span::styled(rendered.status, severity),
                ])),
                Cell::from(format_time(rendered.time, &state.date_format))
                    .style(Style::default().fg(t.text_dim)),
                Cell::from(Text::from(body_lines)),
            ])
            .height(height as u16)
            .style(style),
        );
    }

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(EXPAND_COLUMN_WIDTH),
            Constraint::Length(STATUS_COLUMN_WIDTH),
            Constraint::Length(DATE_COLUMN_WIDTH),
            Constraint::Min(1),
        ],
    )
    .header(header)
    .column_spacing(COLUMN_SPACING)
    .block(block);

    frame.render_widget(table, area);
    render_scrollbar_bordered(frame, area, rows.len(), visible_lines, state.scroll);
}
