//! Entity kind catalogue and disappearance policy configuration.
//!
//! # Responsibility
//! - Enumerate the four synchronized entity kinds.
//! - Map each kind to the policy applied when a stored record's identity
//!   key is absent from the current snapshot.
//!
//! # Invariants
//! - Policy assignment lives in exactly one place (`missing_policy`); the
//!   reconciliation engine must dispatch on it instead of hard-coding
//!   per-kind branches.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The four record tables kept in sync with external sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Actionable items parsed from `tasks.md`.
    Task,
    /// Daily-log and curated memory notes.
    Memory,
    /// Calendar events from external feeds.
    Event,
    /// Team agents reported by the live session list.
    Agent,
}

/// What happens to a stored record whose identity key disappeared from
/// the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Remove the row; no trace remains.
    HardDelete,
    /// Transition to a terminal-but-retained status and refresh the
    /// last-seen stamp; the row is never deleted.
    SoftMark,
}

impl EntityKind {
    /// All kinds in default reconciliation order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Task,
        EntityKind::Memory,
        EntityKind::Event,
        EntityKind::Agent,
    ];

    /// Stable lowercase name used in log lines and outcome reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Memory => "memory",
            Self::Event => "event",
            Self::Agent => "agent",
        }
    }

    /// Disappearance policy for this kind.
    ///
    /// Agents are presence-tracked, so their history must survive a
    /// snapshot that no longer lists them; everything else mirrors the
    /// snapshot exactly.
    pub fn missing_policy(self) -> MissingPolicy {
        match self {
            Self::Task | Self::Memory | Self::Event => MissingPolicy::HardDelete,
            Self::Agent => MissingPolicy::SoftMark,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
