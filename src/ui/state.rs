use std::time::Instant;

use tracing::warn;

use crate::constants::LANGUAGES;
use crate::history::{
    FetchCompletion, FetchOutcome, FetchRequest, HistoryError, HistoryListController, RowToggle,
};
use crate::models::Policy;

use super::layout::{row_at_line, row_height};
use super::theme::Theme;

/// Central view state for the terminal host: the history controller plus
/// everything the screen needs around it.
pub struct AppState {
    pub controller: HistoryListController,
    /// Policies the operator can step through.
    pub policies: Vec<Policy>,

    pub selected_row: usize,
    /// Index of the first visible row.
    pub scroll: usize,
    pub tick_count: u64,

    // ── Status message (shown in status bar) ───────────────────
    pub status_message: Option<(String, Instant)>,

    // ── Presentation ─────────────────────────────────────────
    pub theme: Theme,
    pub current_lang: String,
    pub date_format: String,
}

impl AppState {
    pub fn new(theme: Theme, date_format: String, policies: Vec<Policy>) -> Self {
        Self {
            controller: HistoryListController::new(),
            policies,
            selected_row: 0,
            scroll: 0,
            tick_count: 0,
            status_message: None,
            theme,
            current_lang: rust_i18n::locale().to_string(),
            date_format,
        }
    }

    /// Cycle to the next built-in theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
        self.set_status(t!("msg.theme", name = self.theme.name).to_string());
    }

    /// Cycle to the next UI language.
    pub fn cycle_lang(&mut self) {
        let current_idx = LANGUAGES
            .iter()
            .position(|&l| l == self.current_lang)
            .unwrap_or(0);
        let next_lang = LANGUAGES[(current_idx + 1) % LANGUAGES.len()];
        rust_i18n::set_locale(next_lang);
        self.current_lang = next_lang.to_string();
        self.set_status(t!("msg.lang", lang = next_lang.to_uppercase()).to_string());
    }

    /// Set a status bar message with automatic timestamp.
    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    // ── Policy navigation ────────────────────────────────────────

    /// Position of the shown policy in `policies`.
    pub fn policy_position(&self) -> Option<usize> {
        let current = self.controller.policy()?;
        self.policies.iter().position(|p| p.id == current.id)
    }

    /// Show `policy` (or detach) and reset the cursor.
    pub fn show_policy(&mut self, policy: Option<Policy>) -> Option<FetchRequest> {
        self.reset_cursor();
        self.controller.set_policy(policy)
    }

    /// Show the policy with `id`, if it is known.
    pub fn open_policy(&mut self, id: &str) -> Option<FetchRequest> {
        match self.policies.iter().find(|p| p.id.as_str() == id).cloned() {
            Some(policy) => self.show_policy(Some(policy)),
            None => {
                warn!(policy = id, "unknown policy requested");
                self.set_status(t!("msg.unknown_policy", id = id).to_string());
                None
            }
        }
    }

    /// Stop showing any policy.
    pub fn detach(&mut self) -> Option<FetchRequest> {
        let request = self.show_policy(None);
        self.set_status(t!("msg.detached").to_string());
        request
    }

    pub fn next_policy(&mut self) -> Option<FetchRequest> {
        if self.policies.is_empty() {
            return None;
        }
        let next = match self.policy_position() {
            Some(i) => (i + 1) % self.policies.len(),
            None => 0,
        };
        let policy = self.policies[next].clone();
        self.show_policy(Some(policy))
    }

    pub fn prev_policy(&mut self) -> Option<FetchRequest> {
        if self.policies.is_empty() {
            return None;
        }
        let len = self.policies.len();
        let prev = match self.policy_position() {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        let policy = self.policies[prev].clone();
        self.show_policy(Some(policy))
    }

    // ── History actions ──────────────────────────────────────────

    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let request = self.controller.refresh();
        if request.is_some() {
            self.set_status(t!("msg.refreshing").to_string());
        }
        request
    }

    /// Select the time window at `index`. Ignored while the selector is disabled.
    pub fn select_window(&mut self, index: usize) -> Result<Option<FetchRequest>, HistoryError> {
        if !self.controller.selection_enabled() {
            return Ok(None);
        }
        self.controller.window_changed(index)
    }

    /// Select the window after the current one, wrapping around.
    pub fn next_window(&mut self) -> Option<FetchRequest> {
        if !self.controller.selection_enabled() {
            return None;
        }
        let next = self.controller.window().next().index();
        // `next()` always yields a valid index
        self.controller.window_changed(next).ok().flatten()
    }

    /// Toggle the row at `index`. Out-of-range indices are logged and ignored.
    pub fn toggle(&mut self, index: usize) -> Option<RowToggle> {
        match self.controller.toggle_row(index) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "ignoring row toggle");
                None
            }
        }
    }

    pub fn toggle_selected(&mut self) -> Option<RowToggle> {
        self.toggle(self.selected_row)
    }

    /// Apply a fetch completion. A fresh list moves the cursor back to the top.
    pub fn apply_fetch(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let outcome = self.controller.apply_fetch(completion);
        if matches!(outcome, FetchOutcome::Applied { .. }) {
            self.reset_cursor();
        }
        outcome
    }

    // ── Row cursor ───────────────────────────────────────────────

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.controller.rows().len().saturating_sub(1);
    }

    pub fn reset_cursor(&mut self) {
        self.selected_row = 0;
        self.scroll = 0;
    }

    pub fn select_next(&mut self, step: usize) {
        let last = self.controller.rows().len().saturating_sub(1);
        self.selected_row = (self.selected_row + step).min(last);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected_row = self.selected_row.saturating_sub(step);
    }

    /// Adjust `scroll` so the selected row is fully inside `visible_lines`.
    pub fn ensure_selected_visible(&mut self, body_width: usize, visible_lines: usize) {
        let rows = self.controller.rows();
        if rows.is_empty() {
            self.reset_cursor();
            return;
        }
        self.selected_row = self.selected_row.min(rows.len() - 1);
        if self.selected_row < self.scroll {
            self.scroll = self.selected_row;
            return;
        }
        // Scroll down until the lines from `scroll` through the selected row fit
        loop {
            let used: usize = rows[self.scroll..=self.selected_row]
                .iter()
                .map(|r| row_height(r, body_width))
                .sum();
            if used <= visible_lines || self.scroll == self.selected_row {
                break;
            }
            self.scroll += 1;
        }
    }

    /// The row drawn at display line `line` of the rows area.
    pub fn row_at(&self, line: usize, body_width: usize) -> Option<usize> {
        row_at_line(self.controller.rows(), self.scroll, body_width, line)
    }
}
