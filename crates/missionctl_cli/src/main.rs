//! Scheduled sync job entry point.
//!
//! # Responsibility
//! - Build per-kind snapshots from the workspace files and feeds.
//! - Run one reconciliation pass and print one summary line per kind.
//!
//! Invoked periodically by an external scheduler; the scheduler is
//! responsible for serializing runs.

use log::error;
use missionctl_core::db::open_db;
use missionctl_core::source::{
    collect_daily_logs, load_curated_memory, load_events_feed, load_sessions_feed, load_tasks_file,
};
use missionctl_core::{default_log_level, init_logging, run_sync, SnapshotSet};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EVENTS_FEED_FILE: &str = "events.json";
const SESSIONS_FEED_FILE: &str = "sessions.json";

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let (Some(workspace_root), Some(db_path)) = (args.next(), args.next()) else {
        eprintln!("usage: missionctl_cli <workspace_root> <db_path>");
        return ExitCode::from(2);
    };
    let workspace_root = PathBuf::from(workspace_root);

    let log_dir = workspace_root.join("logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        // Logging is best-effort for the job; a read-only workspace must
        // not block synchronization.
        eprintln!("warning: logging disabled: {err}");
    }

    match sync_once(&workspace_root, Path::new(&db_path)) {
        Ok(all_ok) => {
            if all_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(message) => {
            error!("event=sync_run module=cli status=error error={message}");
            eprintln!("sync failed: {message}");
            ExitCode::FAILURE
        }
    }
}

fn sync_once(workspace_root: &Path, db_path: &Path) -> Result<bool, String> {
    let memory_dir = workspace_root.join("memory");

    let mut snapshots = SnapshotSet::new();

    snapshots.tasks = Some(
        load_tasks_file(&memory_dir.join("tasks.md"))
            .map_err(|err| format!("tasks.md: {err}"))?,
    );

    let mut memories = collect_daily_logs(&memory_dir).map_err(|err| format!("memory: {err}"))?;
    memories.extend(
        load_curated_memory(&workspace_root.join("MEMORY.md"))
            .map_err(|err| format!("MEMORY.md: {err}"))?,
    );
    snapshots.memories = Some(memories);

    snapshots.events = Some(
        load_events_feed(&workspace_root.join(EVENTS_FEED_FILE))
            .map_err(|err| format!("events feed: {err}"))?,
    );
    snapshots.agents = Some(
        load_sessions_feed(&workspace_root.join(SESSIONS_FEED_FILE))
            .map_err(|err| format!("sessions feed: {err}"))?,
    );

    let conn = open_db(db_path).map_err(|err| format!("db open: {err}"))?;
    let report = run_sync(&conn, snapshots);

    for entry in &report.results {
        match &entry.result {
            Ok(outcome) => println!("{outcome}"),
            Err(err) => eprintln!("kind={} failed: {err}", entry.kind),
        }
    }

    Ok(!report.has_failures())
}
