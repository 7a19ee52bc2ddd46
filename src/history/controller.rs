use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::Policy;

use super::{
    FetchCompletion, FetchRequest, HistoryError, HistoryRowModel, TimeWindow, TimeWindowSelector,
};

/// Where the view is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    NoPolicy,
    PolicySet,
    Loading,
    Loaded,
}

/// Result of [`HistoryListController::toggle_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowToggle {
    /// The row flipped; only this row needs re-rendering.
    Toggled { index: usize },
    /// Info row: nothing changed, nothing to re-render.
    Suppressed,
}

/// Result of [`HistoryListController::apply_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { rows: usize },
    /// The policy or window changed while the fetch was in flight.
    Stale,
}

/// Owns the history list for one view: current policy, window selection,
/// the in-flight fetch and the ordered rows.
///
/// All methods run on the host's UI context. Fetching itself happens
/// elsewhere: the controller hands out a [`FetchRequest`] and later
/// receives the matching [`FetchCompletion`] through [`apply_fetch`].
///
/// [`apply_fetch`]: HistoryListController::apply_fetch
#[derive(Debug)]
pub struct HistoryListController {
    policy: Option<Policy>,
    selector: TimeWindowSelector,
    rows: Vec<HistoryRowModel>,
    phase: ViewPhase,
    pending: Option<FetchRequest>,
    next_generation: u64,
}

impl Default for HistoryListController {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryListController {
    pub fn new() -> Self {
        Self {
            policy: None,
            selector: TimeWindowSelector::new(),
            rows: Vec::new(),
            phase: ViewPhase::NoPolicy,
            pending: None,
            next_generation: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    pub fn rows(&self) -> &[HistoryRowModel] {
        &self.rows
    }

    pub fn window(&self) -> TimeWindow {
        self.selector.selected()
    }

    pub fn selection_enabled(&self) -> bool {
        self.selector.is_enabled()
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ── Host operations ───────────────────────────────────────────

    /// Show the history of `policy`, or detach with `None`.
    ///
    /// Returns the fetch to dispatch when a policy is set.
    pub fn set_policy(&mut self, policy: Option<Policy>) -> Option<FetchRequest> {
        match policy {
            None => {
                self.policy = None;
                self.rows.clear();
                self.pending = None;
                self.selector.set_enabled(false);
                self.phase = ViewPhase::NoPolicy;
                None
            }
            Some(policy) => {
                if self.policy.as_ref().map(|p| &p.id) != Some(&policy.id) {
                    // Rows of another policy must never show under this header
                    self.rows.clear();
                }
                self.policy = Some(policy);
                self.selector.set_enabled(true);
                self.phase = ViewPhase::PolicySet;
                self.refresh()
            }
        }
    }

    /// Empty the list. Policy, selection and any in-flight fetch are kept.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Issue a fetch for the current policy and window.
    ///
    /// Any previously issued request becomes stale. Returns `None` when no
    /// policy is set.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let policy = self.policy.as_ref()?;
        self.next_generation += 1;
        let request = FetchRequest {
            generation: self.next_generation,
            policy: policy.id.clone(),
            window: self.selector.selected(),
        };
        debug!(
            policy = %request.policy,
            hours_from_now = request.hours_from_now(),
            generation = request.generation,
            "requesting policy alerts"
        );
        self.pending = Some(request.clone());
        self.phase = ViewPhase::Loading;
        Some(request)
    }

    /// Forward a window selection, then refresh if a policy is shown.
    pub fn window_changed(&mut self, index: usize) -> Result<Option<FetchRequest>, HistoryError> {
        self.selector.select(index)?;
        if self.policy.is_none() {
            return Ok(None);
        }
        Ok(self.refresh())
    }

    /// Apply a resolved fetch. Stale completions are discarded untouched.
    ///
    /// A failed fetch is logged and shown as an empty history.
    pub fn apply_fetch(&mut self, completion: FetchCompletion) -> FetchOutcome {
        let FetchCompletion {
            request,
            result,
            elapsed,
        } = completion;

        if self.pending.as_ref() != Some(&request) {
            debug!(
                policy = %request.policy,
                generation = request.generation,
                "discarding stale alert fetch"
            );
            return FetchOutcome::Stale;
        }
        self.pending = None;

        let alerts = match result {
            Ok(alerts) => {
                debug!(
                    policy = %request.policy,
                    count = alerts.len(),
                    "alert fetch took {:?}",
                    elapsed
                );
                alerts
            }
            Err(e) => {
                warn!(
                    policy = %request.policy,
                    hours_from_now = request.hours_from_now(),
                    error = %e,
                    "alert fetch failed after {:?}, showing empty history",
                    elapsed
                );
                Vec::new()
            }
        };

        let mut rows: Vec<HistoryRowModel> = alerts
            .into_iter()
            .map(|a| HistoryRowModel::new(Arc::new(a)))
            .collect();
        // Stable: equal timestamps keep source order
        rows.sort_by(|a, b| b.alert().time.cmp(&a.alert().time));

        self.rows = rows;
        self.phase = ViewPhase::Loaded;
        FetchOutcome::Applied {
            rows: self.rows.len(),
        }
    }

    /// Flip the expand flag of a row. Info rows never change.
    pub fn toggle_row(&mut self, index: usize) -> Result<RowToggle, HistoryError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;
        if row.toggle() {
            Ok(RowToggle::Toggled { index })
        } else {
            Ok(RowToggle::Suppressed)
        }
    }
}
