//! Memory store: SQLite persistence for the `memories` table.
//!
//! # Invariants
//! - `sync_id` is the identity key and unique by schema.
//! - `tags` is persisted as a JSON string array; invalid JSON read back
//!   from the table is reported, not silently dropped.

use crate::model::kind::EntityKind;
use crate::model::memory::{MemoryCandidate, MemoryKind, StoredMemory};
use crate::repo::{RepoError, RepoResult};
use crate::sync::ReconcileStore;
use rusqlite::{params, Connection, Row};

const MEMORY_SELECT_SQL: &str = "SELECT
    sync_id,
    content,
    date,
    kind,
    tags,
    created_at,
    updated_at
FROM memories";

/// SQLite-backed memory record store.
pub struct SqliteMemoryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoryStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one memory note by identity key.
    pub fn get_by_key(&self, key: &str) -> RepoResult<Option<StoredMemory>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMORY_SELECT_SQL} WHERE sync_id = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_memory_row(row)?));
        }
        Ok(None)
    }
}

impl ReconcileStore for SqliteMemoryStore<'_> {
    type Candidate = MemoryCandidate;
    type Stored = StoredMemory;

    fn kind(&self) -> EntityKind {
        EntityKind::Memory
    }

    fn scan_all(&self) -> RepoResult<Vec<StoredMemory>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMORY_SELECT_SQL} ORDER BY rowid_pk ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut memories = Vec::new();
        while let Some(row) = rows.next()? {
            memories.push(parse_memory_row(row)?);
        }
        Ok(memories)
    }

    fn candidate_key<'a>(&self, candidate: &'a MemoryCandidate) -> &'a str {
        candidate.id.as_str()
    }

    fn stored_key<'a>(&self, stored: &'a StoredMemory) -> &'a str {
        stored.id.as_str()
    }

    fn insert(&self, candidate: &MemoryCandidate, now_ms: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO memories (
                sync_id, content, date, kind, tags, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT(sync_id) DO UPDATE SET
                content = excluded.content,
                date = excluded.date,
                kind = excluded.kind,
                tags = excluded.tags,
                updated_at = excluded.updated_at;",
            params![
                candidate.id,
                candidate.content,
                candidate.date,
                memory_kind_to_db(candidate.kind),
                tags_to_db(&candidate.tags)?,
                now_ms,
            ],
        )?;
        Ok(())
    }

    fn update(&self, key: &str, candidate: &MemoryCandidate, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memories SET
                content = ?1,
                date = ?2,
                kind = ?3,
                tags = ?4,
                updated_at = ?5
             WHERE sync_id = ?6;",
            params![
                candidate.content,
                candidate.date,
                memory_kind_to_db(candidate.kind),
                tags_to_db(&candidate.tags)?,
                now_ms,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Memory,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn delete_by_key(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM memories WHERE sync_id = ?1;", [key])?;
        Ok(())
    }
}

fn parse_memory_row(row: &Row<'_>) -> RepoResult<StoredMemory> {
    let kind_text: String = row.get("kind")?;
    let kind = parse_memory_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid memory kind `{kind_text}` in memories.kind"))
    })?;

    let tags_text: String = row.get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&tags_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid tags JSON in memories.tags: {err}"))
    })?;

    Ok(StoredMemory {
        id: row.get("sync_id")?,
        content: row.get("content")?,
        date: row.get("date")?,
        kind,
        tags,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn tags_to_db(tags: &[String]) -> RepoResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| RepoError::InvalidData(format!("tags not serializable: {err}")))
}

fn memory_kind_to_db(kind: MemoryKind) -> &'static str {
    match kind {
        MemoryKind::Daily => "daily",
        MemoryKind::Curated => "curated",
        MemoryKind::Note => "note",
    }
}

fn parse_memory_kind(value: &str) -> Option<MemoryKind> {
    match value {
        "daily" => Some(MemoryKind::Daily),
        "curated" => Some(MemoryKind::Curated),
        "note" => Some(MemoryKind::Note),
        _ => None,
    }
}
