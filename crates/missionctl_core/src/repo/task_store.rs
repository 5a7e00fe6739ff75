//! Task store: SQLite persistence for the `tasks` table.
//!
//! # Responsibility
//! - Keyed CRUD over tasks mirrored from `tasks.md`.
//! - Implement the reconciliation store contract with hard-delete policy.
//!
//! # Invariants
//! - `sync_id` is the identity key and unique by schema.
//! - `created_at` is written on insert (or preserved on upsert) and never
//!   touched by updates.

use crate::model::kind::EntityKind;
use crate::model::task::{StoredTask, TaskCandidate, TaskPriority, TaskStatus};
use crate::repo::{RepoError, RepoResult};
use crate::sync::ReconcileStore;
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    sync_id,
    title,
    status,
    category,
    priority,
    created_at,
    updated_at,
    completed_at
FROM tasks";

/// SQLite-backed task record store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one task by identity key.
    pub fn get_by_key(&self, key: &str) -> RepoResult<Option<StoredTask>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE sync_id = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }
}

impl ReconcileStore for SqliteTaskStore<'_> {
    type Candidate = TaskCandidate;
    type Stored = StoredTask;

    fn kind(&self) -> EntityKind {
        EntityKind::Task
    }

    fn scan_all(&self) -> RepoResult<Vec<StoredTask>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY rowid_pk ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn candidate_key<'a>(&self, candidate: &'a TaskCandidate) -> &'a str {
        candidate.id.as_str()
    }

    fn stored_key<'a>(&self, stored: &'a StoredTask) -> &'a str {
        stored.id.as_str()
    }

    fn insert(&self, candidate: &TaskCandidate, now_ms: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO tasks (
                sync_id, title, status, category, priority,
                created_at, updated_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7)
            ON CONFLICT(sync_id) DO UPDATE SET
                title = excluded.title,
                status = excluded.status,
                category = excluded.category,
                priority = excluded.priority,
                updated_at = excluded.updated_at,
                completed_at = excluded.completed_at;",
            params![
                candidate.id,
                candidate.title,
                task_status_to_db(candidate.status),
                candidate.category,
                candidate.priority.map(task_priority_to_db),
                now_ms,
                candidate.completed_at,
            ],
        )?;
        Ok(())
    }

    fn update(&self, key: &str, candidate: &TaskCandidate, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET
                title = ?1,
                status = ?2,
                category = ?3,
                priority = ?4,
                updated_at = ?5,
                completed_at = ?6
             WHERE sync_id = ?7;",
            params![
                candidate.title,
                task_status_to_db(candidate.status),
                candidate.category,
                candidate.priority.map(task_priority_to_db),
                now_ms,
                candidate.completed_at,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Task,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn delete_by_key(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE sync_id = ?1;", [key])?;
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<StoredTask> {
    let status_text: String = row.get("status")?;
    let status = parse_task_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let priority = match row.get::<_, Option<String>>("priority")? {
        Some(value) => Some(parse_task_priority(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid task priority `{value}` in tasks.priority"))
        })?),
        None => None,
    };

    Ok(StoredTask {
        id: row.get("sync_id")?,
        title: row.get("title")?,
        status,
        category: row.get("category")?,
        priority,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        completed_at: row.get("completed_at")?,
    })
}

fn task_status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

fn parse_task_status(value: &str) -> Option<TaskStatus> {
    match value {
        "todo" => Some(TaskStatus::Todo),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}

fn task_priority_to_db(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
    }
}

fn parse_task_priority(value: &str) -> Option<TaskPriority> {
    match value {
        "low" => Some(TaskPriority::Low),
        "medium" => Some(TaskPriority::Medium),
        "high" => Some(TaskPriority::High),
        _ => None,
    }
}
