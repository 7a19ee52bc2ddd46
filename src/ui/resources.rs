//! Terminal presentation assets for the history renderer: styled glyphs
//! for icons, localized strings through `rust-i18n`.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::history::{HistoryResources, IconKind, StatusLabel};

use super::theme::Theme;

pub struct TerminalResources<'a> {
    theme: &'a Theme,
}

impl<'a> TerminalResources<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl HistoryResources for TerminalResources<'_> {
    type Icon = Span<'static>;

    fn icon(&self, kind: IconKind) -> Self::Icon {
        let t = self.theme;
        match kind {
            IconKind::Warning => Span::styled("⚠", Style::default().fg(t.warning)),
            IconKind::Success => Span::styled("✔", Style::default().fg(t.success)),
            IconKind::Expanded => Span::styled("▼", Style::default().fg(t.text_dim)),
            IconKind::Collapsed => Span::styled("▶", Style::default().fg(t.text_dim)),
        }
    }

    fn status_text(&self, label: StatusLabel) -> String {
        match label {
            StatusLabel::Error => t!("history.status.error").to_string(),
            StatusLabel::Warning => t!("history.status.warning").to_string(),
            StatusLabel::Information => t!("history.status.information").to_string(),
        }
    }

    fn header_text(&self, policy_name: &str) -> String {
        t!("history.header", name = policy_name).to_string()
    }
}
