//! Core domain logic for missionctl.
//! This crate owns the record stores and the snapshot reconciliation
//! engine behind the dashboard.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod source;
pub mod sync;

pub use logging::{default_log_level, init_logging};
pub use model::agent::{AgentCandidate, AgentStatus, StoredAgent};
pub use model::event::{EventCandidate, EventSource, StoredEvent};
pub use model::kind::{EntityKind, MissingPolicy};
pub use model::memory::{MemoryCandidate, MemoryKind, StoredMemory};
pub use model::task::{StoredTask, TaskCandidate, TaskPriority, TaskStatus};
pub use repo::{
    RepoError, RepoResult, SqliteAgentStore, SqliteEventStore, SqliteMemoryStore, SqliteTaskStore,
};
pub use sync::{
    reconcile, run_sync, KindResult, ReconcileStore, SnapshotSet, SyncError, SyncOutcome,
    SyncReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
