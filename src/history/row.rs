use std::sync::Arc;

use crate::models::Alert;

/// Expand/collapse state for one alert in the history list.
#[derive(Debug, Clone)]
pub struct HistoryRowModel {
    alert: Arc<Alert>,
    expanded: bool,
}

impl HistoryRowModel {
    /// New rows always start collapsed.
    pub fn new(alert: Arc<Alert>) -> Self {
        Self {
            alert,
            expanded: false,
        }
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_expandable(&self) -> bool {
        self.alert.severity.is_expandable()
    }

    /// Flip the expand flag. Returns `false` (and changes nothing) for info rows.
    pub(crate) fn toggle(&mut self) -> bool {
        if !self.is_expandable() {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::alert_at;
    use crate::models::AlertSeverity;

    #[test]
    fn new_row_is_collapsed() {
        let row = HistoryRowModel::new(Arc::new(alert_at(AlertSeverity::Error, 1, "x")));
        assert!(!row.expanded());
    }

    #[test]
    fn toggle_flips_error_and_warn() {
        for sev in [AlertSeverity::Error, AlertSeverity::Warn] {
            let mut row = HistoryRowModel::new(Arc::new(alert_at(sev, 1, "x")));
            assert!(row.toggle());
            assert!(row.expanded());
            assert!(row.toggle());
            assert!(!row.expanded());
        }
    }

    #[test]
    fn toggle_is_suppressed_for_info() {
        let mut row = HistoryRowModel::new(Arc::new(alert_at(AlertSeverity::Info, 1, "x")));
        assert!(!row.toggle());
        assert!(!row.expanded());
    }

    #[test]
    fn alert_is_shared_not_copied() {
        let alert = Arc::new(alert_at(AlertSeverity::Warn, 1, "shared"));
        let row = HistoryRowModel::new(Arc::clone(&alert));
        assert!(std::ptr::eq(row.alert(), alert.as_ref()));
    }
}
