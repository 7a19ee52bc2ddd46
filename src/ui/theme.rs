use ratatui::style::{Color, Modifier, Style};

use crate::models::AlertSeverity;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord"];

/// Data-driven theme: every color the history view uses, in one struct.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand ────────────────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // ── Table ────────────────────────────────────────────────
    pub row_selected_bg: Color,
    pub border: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark palette: slate background, blue accent.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(110, 168, 254),
            bg_dark: Color::Rgb(24, 26, 33),
            text_primary: Color::Rgb(214, 219, 229),
            text_dim: Color::Rgb(128, 135, 150),
            text_muted: Color::Rgb(86, 92, 106),
            success: Color::Rgb(98, 200, 130),
            warning: Color::Rgb(240, 180, 60),
            danger: Color::Rgb(235, 90, 90),
            row_selected_bg: Color::Rgb(44, 48, 64),
            border: Color::Rgb(62, 66, 82),
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),        // yellow
            bg_dark: Color::Rgb(40, 40, 40),         // bg0
            text_primary: Color::Rgb(235, 219, 178), // fg
            text_dim: Color::Rgb(168, 153, 132),     // fg4
            text_muted: Color::Rgb(102, 92, 84),     // bg4
            success: Color::Rgb(142, 192, 124),      // green
            warning: Color::Rgb(250, 189, 47),       // yellow bright
            danger: Color::Rgb(251, 73, 52),         // red
            row_selected_bg: Color::Rgb(60, 56, 54),
            border: Color::Rgb(80, 73, 69),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),       // nord8 frost
            bg_dark: Color::Rgb(46, 52, 64),         // nord0
            text_primary: Color::Rgb(229, 233, 240), // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14 green
            warning: Color::Rgb(235, 203, 139), // nord13 yellow
            danger: Color::Rgb(191, 97, 106),   // nord11 red
            row_selected_bg: Color::Rgb(67, 76, 94),
            border: Color::Rgb(76, 86, 106),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }

    /// The next built-in theme after this one, wrapping around.
    pub fn next_builtin(&self) -> Self {
        let idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .map(|i| (i + 1) % BUILTIN_THEME_NAMES.len())
            .unwrap_or(0);
        Self::by_name(BUILTIN_THEME_NAMES[idx]).unwrap_or_default()
    }

    // ── Styles ───────────────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row_selected(&self) -> Style {
        Style::default()
            .bg(self.row_selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn severity_style(&self, severity: AlertSeverity) -> Style {
        match severity {
            AlertSeverity::Error => Style::default().fg(self.danger),
            AlertSeverity::Warn => Style::default().fg(self.warning),
            AlertSeverity::Info => Style::default().fg(self.success),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
