//! Snapshot reconciliation engine.
//!
//! # Responsibility
//! - Merge a freshly produced snapshot of candidate records into the
//!   persistent store so the store exactly reflects the snapshot.
//! - Preserve stable identities, minimize mutations, and apply the
//!   per-kind disappearance policy.
//!
//! # Invariants
//! - Reconciling the same snapshot twice converges to the same store
//!   contents (second pass creates and removes nothing; it only refreshes
//!   pass stamps).
//! - A single vanished patch target never aborts a whole batch.
//! - Entity kinds are reconciled independently; one kind failing never
//!   prevents or masks the others.

use crate::model::kind::EntityKind;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod apply;
pub mod driver;
pub mod matcher;
pub mod plan;

pub use apply::{apply_plan, reconcile};
pub use driver::{run_sync, KindResult, SnapshotSet, SyncReport};
pub use matcher::IdentityIndex;
pub use plan::{plan_reconcile, ReconcilePlan};

/// Store contract required by the reconciliation engine, implemented by
/// each per-kind SQLite store.
///
/// `delete_by_key` and `soft_mark_missing` have erroring defaults; every
/// store overrides exactly the operation selected by its kind's
/// [`MissingPolicy`](crate::model::kind::MissingPolicy).
pub trait ReconcileStore {
    type Candidate;
    type Stored;

    fn kind(&self) -> EntityKind;

    /// Loads the full table into memory for this run. No caching between
    /// runs; the scan is discarded at run end.
    fn scan_all(&self) -> RepoResult<Vec<Self::Stored>>;

    /// Identity key carried by an incoming candidate. May be empty for
    /// malformed input; the engine then treats the candidate as new.
    fn candidate_key<'a>(&self, candidate: &'a Self::Candidate) -> &'a str;

    /// Identity key of a stored record.
    fn stored_key<'a>(&self, stored: &'a Self::Stored) -> &'a str;

    /// Inserts one candidate with a fresh creation stamp. Implementations
    /// upsert on identity-key conflict so that a create racing an existing
    /// row degrades to an update and `created_at` survives.
    fn insert(&self, candidate: &Self::Candidate, now_ms: i64) -> RepoResult<()>;

    /// Replaces all mutable fields with candidate values and refreshes the
    /// pass stamp. Absent candidate fields are cleared, not preserved.
    /// Returns [`RepoError::NotFound`] when the target vanished.
    fn update(&self, key: &str, candidate: &Self::Candidate, now_ms: i64) -> RepoResult<()>;

    /// Removes one stored record. Deleting an already-deleted key is a
    /// no-op `Ok`.
    fn delete_by_key(&self, key: &str) -> RepoResult<()> {
        let _ = key;
        Err(RepoError::UnsupportedOperation {
            kind: self.kind(),
            op: "delete_by_key",
        })
    }

    /// Transitions one stored record to its retained terminal status and
    /// refreshes the pass stamp, leaving all other fields untouched.
    fn soft_mark_missing(&self, key: &str, now_ms: i64) -> RepoResult<()> {
        let _ = (key, now_ms);
        Err(RepoError::UnsupportedOperation {
            kind: self.kind(),
            op: "soft_mark_missing",
        })
    }
}

/// Phase of a reconciliation batch, reported in errors and skip logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Scan,
    Missing,
    Update,
    Create,
}

impl SyncPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Missing => "missing",
            Self::Update => "update",
            Self::Create => "create",
        }
    }
}

impl Display for SyncPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal failure of one kind's batch, with enough context to re-run.
#[derive(Debug)]
pub struct SyncError {
    pub kind: EntityKind,
    pub phase: SyncPhase,
    pub source: RepoError,
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "reconciliation failed for kind {} in phase {}: {}",
            self.kind, self.phase, self.source
        )
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Per-kind outcome counts reported to the caller after a successful batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub kind: EntityKind,
    pub created: u32,
    pub updated: u32,
    pub removed_or_marked: u32,
    pub skipped: u32,
}

impl SyncOutcome {
    pub fn empty(kind: EntityKind) -> Self {
        Self {
            kind,
            created: 0,
            updated: 0,
            removed_or_marked: 0,
            skipped: 0,
        }
    }
}

impl Display for SyncOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "kind={} created={} updated={} removed_or_marked={} skipped={}",
            self.kind, self.created, self.updated, self.removed_or_marked, self.skipped
        )
    }
}
