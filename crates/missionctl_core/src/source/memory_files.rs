//! Memory snapshot source: daily log files and the curated `MEMORY.md`.
//!
//! # Responsibility
//! - Collect the newest dated daily-log files from the memory directory.
//! - Load the single curated memory document.
//!
//! # Invariants
//! - Only the newest `DAILY_LOG_LIMIT` dated files are reported; older
//!   logs therefore disappear from the snapshot and are hard-deleted by
//!   reconciliation.
//! - Content is truncated on `char` boundaries, never mid code point.

use crate::model::memory::{MemoryCandidate, MemoryKind};
use chrono::Utc;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;

const DAILY_LOG_LIMIT: usize = 20;
const DAILY_CONTENT_MAX_CHARS: usize = 1000;
const CURATED_CONTENT_MAX_CHARS: usize = 2000;
const CURATED_MEMORY_ID: &str = "memory_curated";

static DAILY_LOG_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}\.md$").expect("valid daily log regex"));

/// Collects the newest daily logs as memory candidates.
///
/// A missing directory yields an empty snapshot with a warn log.
pub fn collect_daily_logs(memory_dir: &Path) -> io::Result<Vec<MemoryCandidate>> {
    let entries = match std::fs::read_dir(memory_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "event=source_load module=source status=warn reason=dir_missing path={}",
                memory_dir.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    let mut file_names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if DAILY_LOG_FILE_RE.is_match(name) {
            file_names.push(name.to_string());
        }
    }

    // Dated names sort lexicographically, so descending order is newest
    // first.
    file_names.sort();
    file_names.reverse();
    file_names.truncate(DAILY_LOG_LIMIT);

    let mut memories = Vec::with_capacity(file_names.len());
    for name in file_names {
        let content = std::fs::read_to_string(memory_dir.join(&name))?;
        let date = name.trim_end_matches(".md").to_string();
        memories.push(MemoryCandidate {
            id: format!("daily_{date}"),
            content: truncate_chars(&content, DAILY_CONTENT_MAX_CHARS),
            date,
            kind: MemoryKind::Daily,
            tags: vec!["daily".to_string(), "log".to_string()],
        });
    }

    Ok(memories)
}

/// Loads the curated `MEMORY.md` document as a single-candidate snapshot.
///
/// A missing file yields an empty snapshot with a warn log.
pub fn load_curated_memory(path: &Path) -> io::Result<Vec<MemoryCandidate>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "event=source_load module=source status=warn reason=file_missing path={}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    Ok(vec![MemoryCandidate {
        id: CURATED_MEMORY_ID.to_string(),
        content: truncate_chars(&content, CURATED_CONTENT_MAX_CHARS),
        date: Utc::now().format("%Y-%m-%d").to_string(),
        kind: MemoryKind::Curated,
        tags: vec!["memory".to_string(), "curated".to_string()],
    }])
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
