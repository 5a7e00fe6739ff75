//! Team-agent records synchronized from the live session list.
//!
//! Agents are presence-tracked: disappearing from the session list marks
//! them offline instead of deleting them, so role and task history survive
//! restarts of the agent process.

use serde::{Deserialize, Serialize};

/// Live state of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Working,
    Offline,
}

/// Persisted agent row. Identity key is the human-readable `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAgent {
    pub name: String,
    pub role: String,
    pub status: AgentStatus,
    pub current_task: Option<String>,
    /// Epoch milliseconds, refreshed on every reconciliation pass.
    pub last_active: i64,
    /// Epoch milliseconds, set once at first insertion.
    pub created_at: i64,
}

/// Incoming agent as reported by the session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCandidate {
    pub name: String,
    pub role: String,
    pub status: AgentStatus,
    pub current_task: Option<String>,
}
