//! Calendar event records synchronized from external feeds.

use serde::{Deserialize, Serialize};

/// Feed that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Google,
    Cron,
    Manual,
}

/// Persisted calendar event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Externally assigned identity key, stable across runs.
    pub id: String,
    pub title: String,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Epoch milliseconds; `None` for point events.
    pub end_time: Option<i64>,
    pub source: EventSource,
    pub description: Option<String>,
    /// Epoch milliseconds, set once at first insertion.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every reconciliation pass.
    pub updated_at: i64,
}

/// Incoming event as reported by the snapshot source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCandidate {
    pub id: String,
    pub title: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub source: EventSource,
    pub description: Option<String>,
}
