//! Record store layer: per-kind SQLite persistence.
//!
//! # Responsibility
//! - Provide keyed get/insert/update/delete/scan operations per entity kind.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Identity-key uniqueness is enforced by schema `UNIQUE` constraints.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `created_at` is written on insert and never touched by updates.

use crate::model::kind::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod agent_store;
pub mod event_store;
pub mod memory_store;
pub mod task_store;

pub use agent_store::SqliteAgentStore;
pub use event_store::SqliteEventStore;
pub use memory_store::SqliteMemoryStore;
pub use task_store::SqliteTaskStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query errors shared by all record stores.
#[derive(Debug)]
pub enum RepoError {
    Db(crate::db::DbError),
    /// Patch target vanished between scan and apply.
    NotFound { kind: EntityKind, key: String },
    /// Persisted row violates a domain constraint (bad enum value, bad JSON).
    InvalidData(String),
    /// Operation not available for this kind's disappearance policy.
    UnsupportedOperation { kind: EntityKind, op: &'static str },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, key } => write!(f, "{kind} record not found: `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UnsupportedOperation { kind, op } => {
                write!(f, "operation `{op}` is not supported for kind {kind}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<crate::db::DbError> for RepoError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}
