//! Snapshot sources: turn external inputs into candidate records.
//!
//! # Responsibility
//! - Parse workspace markdown files into task and memory candidates.
//! - Load calendar event and agent session snapshots from JSON feeds.
//!
//! # Invariants
//! - A missing input file degrades to an empty snapshot with a warn log,
//!   never to an error; an empty snapshot is authoritative and clears (or
//!   retires) the corresponding table.
//! - Sources only produce candidates; they never touch the store.

pub mod feeds;
pub mod memory_files;
pub mod tasks_md;

pub use feeds::{load_events_feed, load_sessions_feed, FeedError};
pub use memory_files::{collect_daily_logs, load_curated_memory};
pub use tasks_md::{load_tasks_file, parse_tasks_markdown};
