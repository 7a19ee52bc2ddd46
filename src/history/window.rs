use crate::constants::{DEFAULT_WINDOW_HOURS, LAST_24H_WINDOW_HOURS, LAST_7D_WINDOW_HOURS};

use super::HistoryError;

/// Time window for the alert history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// The source's default recent set (not a zero-width window).
    #[default]
    Default,
    Last24Hours,
    Last7Days,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [
        TimeWindow::Default,
        TimeWindow::Last24Hours,
        TimeWindow::Last7Days,
    ];

    /// Map a 0-based selector index to a window. Out-of-range indices are rejected.
    pub fn from_index(index: usize) -> Result<Self, HistoryError> {
        match index {
            0 => Ok(TimeWindow::Default),
            1 => Ok(TimeWindow::Last24Hours),
            2 => Ok(TimeWindow::Last7Days),
            _ => Err(HistoryError::InvalidSelection { index }),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TimeWindow::Default => 0,
            TimeWindow::Last24Hours => 1,
            TimeWindow::Last7Days => 2,
        }
    }

    /// Hours-from-now passed to the alert source.
    pub fn hours_from_now(&self) -> u32 {
        match self {
            TimeWindow::Default => DEFAULT_WINDOW_HOURS,
            TimeWindow::Last24Hours => LAST_24H_WINDOW_HOURS,
            TimeWindow::Last7Days => LAST_7D_WINDOW_HOURS,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TimeWindow::Default => TimeWindow::Last24Hours,
            TimeWindow::Last24Hours => TimeWindow::Last7Days,
            TimeWindow::Last7Days => TimeWindow::Default,
        }
    }
}

/// Notification emitted by [`TimeWindowSelector::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChange {
    pub previous: TimeWindow,
    pub current: TimeWindow,
}

impl WindowChange {
    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

/// Holds the selected window. Disabled while no policy is shown.
#[derive(Debug, Clone, Default)]
pub struct TimeWindowSelector {
    selected: TimeWindow,
    enabled: bool,
}

impl TimeWindowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> TimeWindow {
        self.selected
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn select(&mut self, index: usize) -> Result<WindowChange, HistoryError> {
        let current = TimeWindow::from_index(index)?;
        let previous = std::mem::replace(&mut self.selected, current);
        Ok(WindowChange { previous, current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_maps_to_hours() {
        let hours: Vec<u32> = (0..3)
            .map(|i| TimeWindow::from_index(i).unwrap().hours_from_now())
            .collect();
        assert_eq!(hours, vec![0, 24, 168]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        for index in [3, 4, 100, usize::MAX] {
            assert_eq!(
                TimeWindow::from_index(index),
                Err(HistoryError::InvalidSelection { index })
            );
        }
    }

    #[test]
    fn index_roundtrip() {
        for w in TimeWindow::ALL {
            assert_eq!(TimeWindow::from_index(w.index()), Ok(w));
        }
    }

    #[test]
    fn next_cycles_through_all() {
        let mut w = TimeWindow::Default;
        let mut seen = vec![w];
        for _ in 0..2 {
            w = w.next();
            seen.push(w);
        }
        assert_eq!(seen, TimeWindow::ALL.to_vec());
        assert_eq!(w.next(), TimeWindow::Default);
    }

    #[test]
    fn selector_starts_on_default_and_disabled() {
        let sel = TimeWindowSelector::new();
        assert_eq!(sel.selected(), TimeWindow::Default);
        assert!(!sel.is_enabled());
    }

    #[test]
    fn select_reports_change() {
        let mut sel = TimeWindowSelector::new();
        let change = sel.select(2).unwrap();
        assert_eq!(change.previous, TimeWindow::Default);
        assert_eq!(change.current, TimeWindow::Last7Days);
        assert!(change.is_change());

        let again = sel.select(2).unwrap();
        assert!(!again.is_change());
    }

    #[test]
    fn invalid_select_keeps_selection() {
        let mut sel = TimeWindowSelector::new();
        sel.select(1).unwrap();
        assert!(sel.select(3).is_err());
        assert_eq!(sel.selected(), TimeWindow::Last24Hours);
    }
}
