//! Agent store: SQLite persistence for the `agents` table.
//!
//! # Invariants
//! - `name` is the identity key; agents carry no separate external id.
//! - Agents are never deleted by reconciliation; disappearance marks them
//!   offline and refreshes `last_active`, retaining role and task history.

use crate::model::agent::{AgentCandidate, AgentStatus, StoredAgent};
use crate::model::kind::EntityKind;
use crate::repo::{RepoError, RepoResult};
use crate::sync::ReconcileStore;
use rusqlite::{params, Connection, Row};

const AGENT_SELECT_SQL: &str = "SELECT
    name,
    role,
    status,
    current_task,
    last_active,
    created_at
FROM agents";

/// SQLite-backed agent record store.
pub struct SqliteAgentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAgentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one agent by name.
    pub fn get_by_key(&self, name: &str) -> RepoResult<Option<StoredAgent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AGENT_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_agent_row(row)?));
        }
        Ok(None)
    }
}

impl ReconcileStore for SqliteAgentStore<'_> {
    type Candidate = AgentCandidate;
    type Stored = StoredAgent;

    fn kind(&self) -> EntityKind {
        EntityKind::Agent
    }

    fn scan_all(&self) -> RepoResult<Vec<StoredAgent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AGENT_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut agents = Vec::new();
        while let Some(row) = rows.next()? {
            agents.push(parse_agent_row(row)?);
        }
        Ok(agents)
    }

    fn candidate_key<'a>(&self, candidate: &'a AgentCandidate) -> &'a str {
        candidate.name.as_str()
    }

    fn stored_key<'a>(&self, stored: &'a StoredAgent) -> &'a str {
        stored.name.as_str()
    }

    fn insert(&self, candidate: &AgentCandidate, now_ms: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO agents (
                name, role, status, current_task, last_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(name) DO UPDATE SET
                role = excluded.role,
                status = excluded.status,
                current_task = excluded.current_task,
                last_active = excluded.last_active;",
            params![
                candidate.name,
                candidate.role,
                agent_status_to_db(candidate.status),
                candidate.current_task,
                now_ms,
            ],
        )?;
        Ok(())
    }

    fn update(&self, key: &str, candidate: &AgentCandidate, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE agents SET
                role = ?1,
                status = ?2,
                current_task = ?3,
                last_active = ?4
             WHERE name = ?5;",
            params![
                candidate.role,
                agent_status_to_db(candidate.status),
                candidate.current_task,
                now_ms,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Agent,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn soft_mark_missing(&self, key: &str, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE agents SET
                status = 'offline',
                last_active = ?1
             WHERE name = ?2;",
            params![now_ms, key],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Agent,
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_agent_row(row: &Row<'_>) -> RepoResult<StoredAgent> {
    let status_text: String = row.get("status")?;
    let status = parse_agent_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid agent status `{status_text}` in agents.status"))
    })?;

    Ok(StoredAgent {
        name: row.get("name")?,
        role: row.get("role")?,
        status,
        current_task: row.get("current_task")?,
        last_active: row.get("last_active")?,
        created_at: row.get("created_at")?,
    })
}

fn agent_status_to_db(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Idle => "idle",
        AgentStatus::Working => "working",
        AgentStatus::Offline => "offline",
    }
}

fn parse_agent_status(value: &str) -> Option<AgentStatus> {
    match value {
        "idle" => Some(AgentStatus::Idle),
        "working" => Some(AgentStatus::Working),
        "offline" => Some(AgentStatus::Offline),
        _ => None,
    }
}
