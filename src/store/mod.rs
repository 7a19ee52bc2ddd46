//! Persistent policy alert store backed by SQLite.
//!
//! Holds scheduled policies and the alerts they raised, and answers
//! time-window queries for the history view through [`AlertSource`].
//!
//! Design:
//! - WAL mode for concurrent reads during writes
//! - Timestamps stored as Unix epoch milliseconds
//! - Results newest first, ties in insertion order
//! - In-process only — no external DB server needed

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::constants::DEFAULT_RECENT_LIMIT;
use crate::models::{Alert, AlertSeverity, Policy, PolicyId};
use crate::source::{AlertSource, FetchError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("alert store lock poisoned")]
    Poisoned,

    #[error("could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<StoreError> for FetchError {
    fn from(e: StoreError) -> Self {
        FetchError::Source(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ── AlertStore ────────────────────────────────────────────────────

/// SQLite-backed store of policies and their alerts.
pub struct AlertStore {
    conn: Mutex<Connection>,
    /// How many alerts the default (hours_from_now == 0) window returns.
    recent_limit: usize,
}

impl AlertStore {
    /// Open (or create) the store.
    ///
    /// If `path` is `None`, uses an in-memory database (useful for tests).
    pub fn open(path: Option<&Path>) -> StoreResult<Self> {
        let conn = match path {
            Some(p) => {
                if let Some(parent) = p.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                Connection::open(p)?
            }
            None => Connection::open_in_memory()?,
        };

        let store = Self {
            conn: Mutex::new(conn),
            recent_limit: DEFAULT_RECENT_LIMIT,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Set how many alerts the default window returns.
    pub fn set_recent_limit(&mut self, limit: usize) {
        self.recent_limit = limit.max(1);
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    // ── Schema ────────────────────────────────────────────────────

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA synchronous=NORMAL;")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS policies (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS policy_alerts (
                id          INTEGER PRIMARY KEY,
                policy_id   TEXT NOT NULL,
                ts          INTEGER NOT NULL,
                severity    TEXT NOT NULL,
                short_body  TEXT NOT NULL,
                full_text   TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_alerts_policy_ts ON policy_alerts(policy_id, ts);",
        )?;
        Ok(())
    }

    // ── Policies ──────────────────────────────────────────────────

    /// Insert or rename a policy.
    pub fn insert_policy(&self, policy: &Policy) -> StoreResult<()> {
        self.conn()?.execute(
            "INSERT INTO policies (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![policy.id.as_str(), policy.name],
        )?;
        Ok(())
    }

    /// All policies, ordered by name.
    pub fn list_policies(&self) -> StoreResult<Vec<Policy>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM policies ORDER BY name ASC, id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Policy::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn find_policy(&self, id: &str) -> StoreResult<Option<Policy>> {
        Ok(self.list_policies()?.into_iter().find(|p| p.id.as_str() == id))
    }

    // ── Alerts ────────────────────────────────────────────────────

    pub fn insert_alert(&self, policy: &PolicyId, alert: &Alert) -> StoreResult<()> {
        self.conn()?.execute(
            "INSERT INTO policy_alerts (policy_id, ts, severity, short_body, full_text)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                policy.as_str(),
                alert.time.timestamp_millis(),
                alert.severity.as_tag(),
                alert.short_body,
                alert.full_text,
            ],
        )?;
        Ok(())
    }

    /// The newest `recent_limit` alerts of `policy`.
    pub fn query_recent(&self, policy: &PolicyId) -> StoreResult<Vec<Alert>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT ts, severity, short_body, full_text FROM policy_alerts
             WHERE policy_id = ?1 ORDER BY ts DESC, id ASC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![policy.as_str(), self.recent_limit as i64], row_to_alert)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Alerts of `policy` raised at or after `since`.
    pub fn query_since(&self, policy: &PolicyId, since: DateTime<Utc>) -> StoreResult<Vec<Alert>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT ts, severity, short_body, full_text FROM policy_alerts
             WHERE policy_id = ?1 AND ts >= ?2 ORDER BY ts DESC, id ASC",
        )?;
        let rows = stmt.query_map(params![policy.as_str(), since.timestamp_millis()], row_to_alert)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Row counts per table (for the status line).
    pub fn table_stats(&self) -> StoreResult<Vec<(String, u64)>> {
        let conn = self.conn()?;
        let mut stats = Vec::new();
        for table in ["policies", "policy_alerts"] {
            let count: u64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
            stats.push((table.to_string(), count));
        }
        Ok(stats)
    }

    // ── Demo data ─────────────────────────────────────────────────

    /// Populate two snapshot policies with a week of mixed alerts.
    pub fn seed_demo(&self, now: DateTime<Utc>) -> StoreResult<()> {
        let nightly = Policy::new("vmss-nightly", "Nightly snapshots (production)");
        let hourly = Policy::new("vmss-hourly", "Hourly snapshots (build farm)");
        self.insert_policy(&nightly)?;
        self.insert_policy(&hourly)?;

        for day in 0..7 {
            let at = now - Duration::days(day) - Duration::hours(2);
            let (severity, short, full) = match day % 3 {
                0 => (
                    AlertSeverity::Info,
                    "Snapshot schedule completed successfully",
                    "All 12 VMs were snapshotted. Oldest snapshots beyond the retention count were removed.",
                ),
                1 => (
                    AlertSeverity::Warn,
                    "Snapshot schedule completed with warnings",
                    "2 of 12 VMs were skipped because they were suspended at the time of the run.",
                ),
                _ => (
                    AlertSeverity::Error,
                    "Snapshot schedule failed for one or more VMs in the pool because the storage repository ran out of space",
                    "VM 'db-primary': SR_BACKEND_FAILURE_44 insufficient space on storage repository 'Local storage'.\nVM 'db-replica': snapshot aborted after the first failure.",
                ),
            };
            self.insert_alert(&nightly.id, &Alert::new(severity, at, short, full))?;
        }

        for hour in 0..30 {
            let at = now - Duration::hours(hour);
            let alert = if hour % 10 == 3 {
                Alert::new(
                    AlertSeverity::Warn,
                    at,
                    "Snapshot took longer than the schedule interval",
                    format!("Run started {} hours ago overlapped the next scheduled run.", hour),
                )
            } else {
                Alert::new(
                    AlertSeverity::Info,
                    at,
                    "Snapshot schedule completed successfully",
                    "All 40 build agents were snapshotted.",
                )
            };
            self.insert_alert(&hourly.id, &alert)?;
        }
        Ok(())
    }
}

impl AlertSource for AlertStore {
    fn get_alerts(&self, policy: &PolicyId, hours_from_now: u32) -> Result<Vec<Alert>, FetchError> {
        let alerts = if hours_from_now == 0 {
            self.query_recent(policy)?
        } else {
            let since = Utc::now() - Duration::hours(i64::from(hours_from_now));
            self.query_since(policy, since)?
        };
        Ok(alerts)
    }
}

fn row_to_alert(row: &rusqlite::Row<'_>) -> rusqlite::Result<Alert> {
    let ts: i64 = row.get(0)?;
    let severity: String = row.get(1)?;
    Ok(Alert {
        severity: AlertSeverity::from_tag(&severity),
        time: Utc.timestamp_millis_opt(ts).single().unwrap_or_default(),
        short_body: row.get(2)?,
        full_text: row.get(3)?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_policy() -> (AlertStore, PolicyId) {
        let store = AlertStore::open(None).unwrap();
        let policy = Policy::new("p1", "nightly");
        store.insert_policy(&policy).unwrap();
        (store, policy.id)
    }

    fn alert(severity: AlertSeverity, at: DateTime<Utc>, short: &str) -> Alert {
        Alert::new(severity, at, short, format!("{} details", short))
    }

    // ── Schema ────────────────────────────────────────────────────

    #[test]
    fn open_in_memory() {
        assert!(AlertStore::open(None).is_ok());
    }

    #[test]
    fn table_stats_empty() {
        let store = AlertStore::open(None).unwrap();
        let stats = store.table_stats().unwrap();
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn open_on_disk_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("alerts.db");
        let store = AlertStore::open(Some(&path)).unwrap();
        store.insert_policy(&Policy::new("p", "x")).unwrap();
        drop(store);

        let reopened = AlertStore::open(Some(&path)).unwrap();
        assert_eq!(reopened.list_policies().unwrap().len(), 1);
    }

    // ── Policies ──────────────────────────────────────────────────

    #[test]
    fn insert_policy_upserts_name() {
        let (store, _) = store_with_policy();
        store.insert_policy(&Policy::new("p1", "renamed")).unwrap();
        let policies = store.list_policies().unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].name, "renamed");
    }

    #[test]
    fn find_policy_by_id() {
        let (store, _) = store_with_policy();
        assert_eq!(store.find_policy("p1").unwrap().unwrap().name, "nightly");
        assert!(store.find_policy("missing").unwrap().is_none());
    }

    // ── Alerts ────────────────────────────────────────────────────

    #[test]
    fn alert_roundtrip_preserves_fields() {
        let (store, id) = store_with_policy();
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let a = alert(AlertSeverity::Error, at, "failed");
        store.insert_alert(&id, &a).unwrap();
        assert_eq!(store.query_recent(&id).unwrap(), vec![a]);
    }

    #[test]
    fn recent_window_is_limited_and_newest_first() {
        let (mut store, id) = store_with_policy();
        store.set_recent_limit(3);
        let base = Utc::now();
        for i in 0..5 {
            store
                .insert_alert(&id, &alert(AlertSeverity::Info, base - Duration::minutes(i), &format!("a{}", i)))
                .unwrap();
        }
        let shorts: Vec<String> = store
            .get_alerts(&id, 0)
            .unwrap()
            .into_iter()
            .map(|a| a.short_body)
            .collect();
        assert_eq!(shorts, vec!["a0", "a1", "a2"]);
    }

    #[test]
    fn hours_window_filters_by_age() {
        let (store, id) = store_with_policy();
        let now = Utc::now();
        store.insert_alert(&id, &alert(AlertSeverity::Warn, now - Duration::hours(1), "recent")).unwrap();
        store.insert_alert(&id, &alert(AlertSeverity::Warn, now - Duration::hours(30), "yesterday")).unwrap();
        store.insert_alert(&id, &alert(AlertSeverity::Warn, now - Duration::days(8), "old")).unwrap();

        assert_eq!(store.get_alerts(&id, 24).unwrap().len(), 1);
        assert_eq!(store.get_alerts(&id, 168).unwrap().len(), 2);
    }

    #[test]
    fn alerts_are_scoped_to_policy() {
        let (store, id) = store_with_policy();
        let other = PolicyId::new("p2");
        store.insert_alert(&other, &alert(AlertSeverity::Info, Utc::now(), "other")).unwrap();
        assert!(store.get_alerts(&id, 0).unwrap().is_empty());
        assert_eq!(store.get_alerts(&other, 0).unwrap().len(), 1);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let (store, id) = store_with_policy();
        let at = Utc::now();
        for name in ["first", "second", "third"] {
            store.insert_alert(&id, &alert(AlertSeverity::Info, at, name)).unwrap();
        }
        let shorts: Vec<String> = store
            .get_alerts(&id, 24)
            .unwrap()
            .into_iter()
            .map(|a| a.short_body)
            .collect();
        assert_eq!(shorts, vec!["first", "second", "third"]);
    }

    #[test]
    fn unknown_severity_tag_reads_as_info() {
        let (store, id) = store_with_policy();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO policy_alerts (policy_id, ts, severity, short_body, full_text)
                 VALUES (?1, ?2, 'critical', 's', 'f')",
                params![id.as_str(), Utc::now().timestamp_millis()],
            )
            .unwrap();
        let alerts = store.get_alerts(&id, 0).unwrap();
        assert_eq!(alerts[0].severity, AlertSeverity::Info);
    }

    // ── Demo data ─────────────────────────────────────────────────

    #[test]
    fn seed_demo_populates_two_policies() {
        let store = AlertStore::open(None).unwrap();
        store.seed_demo(Utc::now()).unwrap();
        let policies = store.list_policies().unwrap();
        assert_eq!(policies.len(), 2);

        let nightly = PolicyId::new("vmss-nightly");
        assert_eq!(store.get_alerts(&nightly, 168).unwrap().len(), 7);
        assert_eq!(store.get_alerts(&PolicyId::new("vmss-hourly"), 0).unwrap().len(), 10);
    }
}
