//! Synchronization driver: one scheduled run across all entity kinds.
//!
//! # Responsibility
//! - Invoke snapshot reconciliation once per provided kind.
//! - Report one outcome-or-error per kind for observability.
//!
//! # Invariants
//! - Kinds are reconciled independently; a failure for one kind never
//!   prevents attempting, nor masks the outcomes of, the remaining kinds.
//! - One pass stamp is taken per run and shared by all kinds.

use crate::model::agent::AgentCandidate;
use crate::model::event::EventCandidate;
use crate::model::kind::EntityKind;
use crate::model::memory::MemoryCandidate;
use crate::model::task::TaskCandidate;
use crate::repo::{SqliteAgentStore, SqliteEventStore, SqliteMemoryStore, SqliteTaskStore};
use crate::sync::{reconcile, SyncError, SyncOutcome};
use log::{error, info};
use rusqlite::Connection;

/// Snapshots for one run. A kind is reconciled iff its snapshot is
/// present; `Some(vec![])` is a valid empty snapshot that removes or
/// retires every stored record of that kind.
#[derive(Debug, Default)]
pub struct SnapshotSet {
    pub tasks: Option<Vec<TaskCandidate>>,
    pub memories: Option<Vec<MemoryCandidate>>,
    pub events: Option<Vec<EventCandidate>>,
    pub agents: Option<Vec<AgentCandidate>>,
}

impl SnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome-or-error for one kind within a run.
#[derive(Debug)]
pub struct KindResult {
    pub kind: EntityKind,
    pub result: Result<SyncOutcome, SyncError>,
}

/// Per-run report: one entry per attempted kind, in run order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<KindResult>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|entry| entry.result.is_err())
    }

    fn push(&mut self, kind: EntityKind, result: Result<SyncOutcome, SyncError>) {
        match &result {
            Ok(outcome) => info!("event=sync_kind module=sync status=ok {outcome}"),
            Err(err) => error!(
                "event=sync_kind module=sync status=error kind={kind} phase={} error={}",
                err.phase, err.source
            ),
        }
        self.results.push(KindResult { kind, result });
    }
}

/// Runs one reconciliation pass over the provided snapshots.
///
/// # Side effects
/// - Emits one `sync_kind` log line per attempted kind.
pub fn run_sync(conn: &Connection, snapshots: SnapshotSet) -> SyncReport {
    let now_ms = chrono::Utc::now().timestamp_millis();
    let mut report = SyncReport::default();

    if let Some(tasks) = snapshots.tasks {
        let store = SqliteTaskStore::new(conn);
        report.push(EntityKind::Task, reconcile(&store, tasks, now_ms));
    }
    if let Some(memories) = snapshots.memories {
        let store = SqliteMemoryStore::new(conn);
        report.push(EntityKind::Memory, reconcile(&store, memories, now_ms));
    }
    if let Some(events) = snapshots.events {
        let store = SqliteEventStore::new(conn);
        report.push(EntityKind::Event, reconcile(&store, events, now_ms));
    }
    if let Some(agents) = snapshots.agents {
        let store = SqliteAgentStore::new(conn);
        report.push(EntityKind::Agent, reconcile(&store, agents, now_ms));
    }

    report
}
