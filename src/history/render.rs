//! Display rules for history rows.
//!
//! Everything here is a pure function of `(alert, expanded)`. Icons and
//! user-facing strings come from the host through [`HistoryResources`], so
//! the rules stay independent of any toolkit or locale.

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::constants::{DEFAULT_BODY_BUDGET, ERROR_BODY_BUDGET};
use crate::models::{Alert, AlertSeverity, Policy};
use crate::utils::{ellipsise, ellipsise_width};

use super::HistoryRowModel;

/// Icons the renderer asks the host for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Warning,
    Success,
    Expanded,
    Collapsed,
}

/// Localized status strings the renderer asks the host for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Error,
    Warning,
    Information,
}

/// Presentation assets owned by the host.
pub trait HistoryResources {
    /// Opaque renderable icon handle.
    type Icon: Clone;

    fn icon(&self, kind: IconKind) -> Self::Icon;

    fn status_text(&self, label: StatusLabel) -> String;

    /// The header label with `policy_name` substituted into the localized template.
    fn header_text(&self, policy_name: &str) -> String;
}

/// Display fields for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow<I> {
    /// `None` when the row has no expand affordance.
    pub expand: Option<I>,
    pub icon: I,
    pub status: String,
    pub time: DateTime<Utc>,
    pub body: String,
}

pub fn status_label(severity: AlertSeverity) -> StatusLabel {
    match severity {
        AlertSeverity::Error => StatusLabel::Error,
        AlertSeverity::Warn => StatusLabel::Warning,
        AlertSeverity::Info => StatusLabel::Information,
    }
}

pub fn status_icon(severity: AlertSeverity) -> IconKind {
    match severity {
        AlertSeverity::Error | AlertSeverity::Warn => IconKind::Warning,
        AlertSeverity::Info => IconKind::Success,
    }
}

pub fn expand_icon(severity: AlertSeverity, expanded: bool) -> Option<IconKind> {
    match severity {
        AlertSeverity::Info => None,
        AlertSeverity::Error | AlertSeverity::Warn if expanded => Some(IconKind::Expanded),
        AlertSeverity::Error | AlertSeverity::Warn => Some(IconKind::Collapsed),
    }
}

/// Collapsed body budget. Error rows are tighter than the rest.
pub fn body_budget(severity: AlertSeverity) -> usize {
    match severity {
        AlertSeverity::Error => ERROR_BODY_BUDGET,
        AlertSeverity::Warn | AlertSeverity::Info => DEFAULT_BODY_BUDGET,
    }
}

pub fn render_body(alert: &Alert, expanded: bool) -> String {
    match (alert.severity, expanded) {
        (AlertSeverity::Error, true) => format!("{}\n{}", alert.short_body, alert.full_text),
        (AlertSeverity::Warn | AlertSeverity::Info, true) => alert.full_text.clone(),
        (severity, false) => ellipsise(&alert.short_body, body_budget(severity)),
    }
}

pub fn render_row<R: HistoryResources>(row: &HistoryRowModel, res: &R) -> RenderedRow<R::Icon> {
    let alert = row.alert();
    RenderedRow {
        expand: expand_icon(alert.severity, row.expanded()).map(|k| res.icon(k)),
        icon: res.icon(status_icon(alert.severity)),
        status: res.status_text(status_label(alert.severity)),
        time: alert.time,
        body: render_body(alert, row.expanded()),
    }
}

/// Header label for `policy`, with the name ellipsised to fit `max_width` columns.
///
/// Empty when no policy is shown.
pub fn header_label<R: HistoryResources>(policy: Option<&Policy>, res: &R, max_width: usize) -> String {
    let Some(policy) = policy else {
        return String::new();
    };
    let available = max_width.saturating_sub(res.header_text("").width());
    res.header_text(&ellipsise_width(&policy.name, available))
}
