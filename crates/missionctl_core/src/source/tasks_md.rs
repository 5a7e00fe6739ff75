//! Task snapshot source: parse the workspace `tasks.md` checklist.
//!
//! # Responsibility
//! - Turn `## Category` headings and `- [ ]` / `- [x]` checklist lines
//!   into task candidates.
//! - Derive a stable content-based identity key per task.
//!
//! # Invariants
//! - The identity key is deterministic across runs for an unchanged title,
//!   so re-parsing the same file updates records instead of churning them.
//! - Two tasks whose titles share the first 20 characters collide on one
//!   key; the planner resolves that last-write-wins.

use crate::model::task::{TaskCandidate, TaskPriority, TaskStatus};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;

const DEFAULT_CATEGORY: &str = "General";
const ID_TITLE_PREFIX_CHARS: usize = 20;

static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(.+)$").expect("valid category regex"));
static CHECKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s+\[([ x])\]\s+(.+)$").expect("valid checklist regex"));

/// Reads and parses `tasks.md`. A missing file yields an empty snapshot.
pub fn load_tasks_file(path: &Path) -> io::Result<Vec<TaskCandidate>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_tasks_markdown(&content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "event=source_load module=source status=warn reason=file_missing path={}",
                path.display()
            );
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Parses checklist markdown into task candidates in file order.
pub fn parse_tasks_markdown(content: &str) -> Vec<TaskCandidate> {
    let mut tasks = Vec::new();
    let mut current_category = DEFAULT_CATEGORY.to_string();

    for line in content.lines() {
        if let Some(caps) = CATEGORY_RE.captures(line) {
            current_category = caps[1].trim().to_string();
            continue;
        }

        if let Some(caps) = CHECKLIST_RE.captures(line) {
            let done = &caps[1] == "x";
            let title = caps[2].trim().to_string();

            tasks.push(TaskCandidate {
                id: task_identity(&title),
                title,
                status: if done {
                    TaskStatus::Done
                } else {
                    TaskStatus::Todo
                },
                category: Some(current_category.clone()),
                priority: Some(TaskPriority::Medium),
                completed_at: None,
            });
        }
    }

    tasks
}

/// Derives the stable identity key from a task title: `task_` plus the
/// first 20 characters with whitespace replaced by underscores.
fn task_identity(title: &str) -> String {
    let prefix: String = title
        .chars()
        .take(ID_TITLE_PREFIX_CHARS)
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect();
    format!("task_{prefix}")
}
