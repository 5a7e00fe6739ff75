//! Task records synchronized from the workspace `tasks.md` checklist.

use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

/// Task priority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTask {
    /// Externally assigned identity key, stable across runs.
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub category: Option<String>,
    pub priority: Option<TaskPriority>,
    /// Epoch milliseconds, set once at first insertion.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every reconciliation pass.
    pub updated_at: i64,
    pub completed_at: Option<i64>,
}

/// Incoming task as reported by the snapshot source.
///
/// Absent optional fields clear the stored value on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCandidate {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub category: Option<String>,
    pub priority: Option<TaskPriority>,
    pub completed_at: Option<i64>,
}
