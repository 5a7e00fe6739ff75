//! Identity matcher: exact-equality lookup from identity key to stored record.
//!
//! # Responsibility
//! - Build a key-to-record mapping from one full table scan.
//! - Resolve each incoming candidate to zero-or-one stored record.
//!
//! # Invariants
//! - Matching is exact string equality; no fuzzy or partial matching.
//! - An empty identity key never matches anything. Malformed input degrades
//!   to "new record", not to a fault.

use std::collections::HashMap;

/// Per-run in-memory index over one kind's stored records.
///
/// Built once per reconciliation pass from `scan_all` output and discarded
/// at run end.
pub struct IdentityIndex<'a, S> {
    by_key: HashMap<&'a str, &'a S>,
}

impl<'a, S> IdentityIndex<'a, S> {
    /// Builds the index in one O(n) pass.
    ///
    /// Records with an empty key are not indexed. If the scan somehow
    /// contains two records with the same key, the later one wins; the
    /// schema's UNIQUE constraints make that unreachable in practice.
    pub fn build(records: &'a [S], key_of: impl Fn(&'a S) -> &'a str) -> Self {
        let mut by_key = HashMap::with_capacity(records.len());
        for record in records {
            let key = key_of(record);
            if !key.is_empty() {
                by_key.insert(key, record);
            }
        }
        Self { by_key }
    }

    /// Returns the stored record matching `key`, or `None` for unknown or
    /// empty keys.
    pub fn get(&self, key: &str) -> Option<&'a S> {
        if key.is_empty() {
            return None;
        }
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
