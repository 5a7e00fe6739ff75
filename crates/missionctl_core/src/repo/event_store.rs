//! Event store: SQLite persistence for the `events` table.

use crate::model::event::{EventCandidate, EventSource, StoredEvent};
use crate::model::kind::EntityKind;
use crate::repo::{RepoError, RepoResult};
use crate::sync::ReconcileStore;
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    sync_id,
    title,
    start_time,
    end_time,
    source,
    description,
    created_at,
    updated_at
FROM events";

/// SQLite-backed calendar event store.
pub struct SqliteEventStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Gets one event by identity key.
    pub fn get_by_key(&self, key: &str) -> RepoResult<Option<StoredEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE sync_id = ?1;"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }
}

impl ReconcileStore for SqliteEventStore<'_> {
    type Candidate = EventCandidate;
    type Stored = StoredEvent;

    fn kind(&self) -> EntityKind {
        EntityKind::Event
    }

    fn scan_all(&self) -> RepoResult<Vec<StoredEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY start_time ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn candidate_key<'a>(&self, candidate: &'a EventCandidate) -> &'a str {
        candidate.id.as_str()
    }

    fn stored_key<'a>(&self, stored: &'a StoredEvent) -> &'a str {
        stored.id.as_str()
    }

    fn insert(&self, candidate: &EventCandidate, now_ms: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO events (
                sync_id, title, start_time, end_time, source, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            ON CONFLICT(sync_id) DO UPDATE SET
                title = excluded.title,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                source = excluded.source,
                description = excluded.description,
                updated_at = excluded.updated_at;",
            params![
                candidate.id,
                candidate.title,
                candidate.start_time,
                candidate.end_time,
                event_source_to_db(candidate.source),
                candidate.description,
                now_ms,
            ],
        )?;
        Ok(())
    }

    fn update(&self, key: &str, candidate: &EventCandidate, now_ms: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE events SET
                title = ?1,
                start_time = ?2,
                end_time = ?3,
                source = ?4,
                description = ?5,
                updated_at = ?6
             WHERE sync_id = ?7;",
            params![
                candidate.title,
                candidate.start_time,
                candidate.end_time,
                event_source_to_db(candidate.source),
                candidate.description,
                now_ms,
                key,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Event,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn delete_by_key(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM events WHERE sync_id = ?1;", [key])?;
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<StoredEvent> {
    let source_text: String = row.get("source")?;
    let source = parse_event_source(&source_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid event source `{source_text}` in events.source"))
    })?;

    Ok(StoredEvent {
        id: row.get("sync_id")?,
        title: row.get("title")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        source,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn event_source_to_db(source: EventSource) -> &'static str {
    match source {
        EventSource::Google => "google",
        EventSource::Cron => "cron",
        EventSource::Manual => "manual",
    }
}

fn parse_event_source(value: &str) -> Option<EventSource> {
    match value {
        "google" => Some(EventSource::Google),
        "cron" => Some(EventSource::Cron),
        "manual" => Some(EventSource::Manual),
        _ => None,
    }
}
