//! Header bar: policy label, time window selector, loading spinner.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::WINDOW_SELECTOR_WIDTH;
use crate::history::render::header_label;
use crate::history::TimeWindow;
use crate::ui::resources::TerminalResources;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::utils::spinner_char;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),                       // Policy label
            Constraint::Length(WINDOW_SELECTOR_WIDTH), // Window selector
        ])
        .split(area);

    // Policy label: bordered, one leading space, spinner slot on the right
    let controller = &state.controller;
    let res = TerminalResources::new(t);
    let spinner_width = if controller.is_loading() { 2 } else { 0 };
    let label_width = (chunks[0].width as usize).saturating_sub(3 + spinner_width);
    let label = header_label(controller.policy(), &res, label_width);

    let mut spans = vec![Span::raw(" "), Span::styled(label, t.header_style())];
    if controller.is_loading() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner_char(state.tick_count),
            Style::default().fg(t.accent),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(header, chunks[0]);

    let selector = Paragraph::new(Line::from(window_spans(
        t,
        controller.window(),
        controller.selection_enabled(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(selector, chunks[1]);
}

/// Selector entries with their shortcut keys; dimmed while the selector is disabled.
fn window_spans(t: &Theme, selected: TimeWindow, enabled: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, window) in TimeWindow::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(t.text_muted)));
        }
        let text = format!("{} {}", i + 1, window_label(*window));
        let style = if !enabled {
            Style::default().fg(t.text_muted)
        } else if *window == selected {
            Style::default()
                .fg(t.bg_dark)
                .bg(t.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.text_dim)
        };
        spans.push(Span::styled(text, style));
    }
    spans
}

fn window_label(window: TimeWindow) -> String {
    match window {
        TimeWindow::Default => t!("history.window.default").to_string(),
        TimeWindow::Last24Hours => t!("history.window.last_24h").to_string(),
        TimeWindow::Last7Days => t!("history.window.last_7d").to_string(),
    }
}
