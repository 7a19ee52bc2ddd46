//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::AppState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    // Helper to create a keybind badge
    let badge = |key: &str, color: ratatui::style::Color| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::styled(" ", Style::default()),
        badge("q", t.accent),
        dim(&t!("status.quit").to_string()),
        badge("↑↓", t.accent),
        dim(&t!("status.scroll").to_string()),
        badge("Enter", t.accent),
        dim(&t!("status.expand").to_string()),
        badge("1-3", t.accent),
        dim(&t!("status.window").to_string()),
        badge("n/p", t.accent),
        dim(&t!("status.policy").to_string()),
        badge("r", t.accent),
        dim(&t!("status.refresh").to_string()),
        badge("t", t.accent),
        dim(&t!("status.theme", name = t.name).to_string()),
        badge("l", t.accent),
        dim(&t!("status.lang", lang = state.current_lang.to_uppercase()).to_string()),
    ];

    // Show status message -- auto-expires
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}
