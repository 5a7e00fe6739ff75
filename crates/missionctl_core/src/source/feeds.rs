//! JSON feed sources for calendar events and agent sessions.
//!
//! # Responsibility
//! - Deserialize externally produced feed files into candidate records.
//!
//! # Invariants
//! - A missing feed file yields an empty snapshot (the feed producer not
//!   having run yet must not wipe intent: callers decide whether to pass
//!   the empty snapshot to the driver).
//! - Malformed JSON is an error for that kind only; reconciliation of the
//!   other kinds proceeds.

use crate::model::agent::AgentCandidate;
use crate::model::event::EventCandidate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;

/// Feed loading errors.
#[derive(Debug)]
pub enum FeedError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "feed read failed: {err}"),
            Self::Json(err) => write!(f, "feed is not valid JSON: {err}"),
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for FeedError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Loads the calendar events feed (Google Calendar + cron exports merged
/// upstream into one JSON array).
pub fn load_events_feed(path: &Path) -> Result<Vec<EventCandidate>, FeedError> {
    load_feed(path)
}

/// Loads the live agent session list feed.
pub fn load_sessions_feed(path: &Path) -> Result<Vec<AgentCandidate>, FeedError> {
    load_feed(path)
}

fn load_feed<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "event=source_load module=source status=warn reason=feed_missing path={}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(serde_json::from_str(&content)?)
}
