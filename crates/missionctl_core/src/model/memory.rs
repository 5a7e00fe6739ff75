//! Memory-note records synchronized from daily logs and `MEMORY.md`.

use serde::{Deserialize, Serialize};

/// Origin of a memory note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// One dated daily-log file.
    Daily,
    /// The long-lived curated memory document.
    Curated,
    /// Free-form note created outside file sync.
    Note,
}

/// Persisted memory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMemory {
    /// Externally assigned identity key, stable across runs.
    pub id: String,
    pub content: String,
    /// `YYYY-MM-DD` date the note refers to.
    pub date: String,
    pub kind: MemoryKind,
    pub tags: Vec<String>,
    /// Epoch milliseconds, set once at first insertion.
    pub created_at: i64,
    /// Epoch milliseconds, refreshed on every reconciliation pass.
    pub updated_at: i64,
}

/// Incoming memory note as reported by the snapshot source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCandidate {
    pub id: String,
    pub content: String,
    pub date: String,
    pub kind: MemoryKind,
    #[serde(default)]
    pub tags: Vec<String>,
}
