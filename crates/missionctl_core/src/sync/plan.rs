//! Diff planner: classify snapshot candidates into action sets.
//!
//! # Responsibility
//! - Compute `to_create`, `to_update` and `to_missing` for one kind in
//!   O(existing + incoming) using the identity index.
//! - Resolve within-snapshot duplicate identities deterministically.
//!
//! # Invariants
//! - When the snapshot carries two candidates with the same identity key,
//!   the later one in iteration order wins; the duplicate is reported for
//!   warn logging, never raised as an error.
//! - A candidate with an empty identity key is always classified as a
//!   create (see `matcher`).
//! - A stored record whose key matches no surviving candidate lands in
//!   `to_missing`.

use crate::sync::matcher::IdentityIndex;
use std::collections::{HashMap, HashSet};

/// Planned action sets for one kind's reconciliation batch.
#[derive(Debug)]
pub struct ReconcilePlan<C, S> {
    /// Candidates with no match in the store, inserted with a fresh
    /// creation stamp.
    pub to_create: Vec<C>,
    /// Matched candidates, applied as full replacement of mutable fields.
    pub to_update: Vec<(String, C)>,
    /// Stored records absent from the snapshot, handled per kind policy.
    pub to_missing: Vec<S>,
    /// Identity keys that appeared more than once in the snapshot; one
    /// entry per discarded earlier occurrence.
    pub duplicate_keys: Vec<String>,
}

/// Computes the reconciliation plan for one kind.
///
/// `existing` is the full scan of the stored table; `incoming` is the
/// snapshot in source order. Key extractors are supplied by the store so
/// the algorithm stays kind-agnostic.
pub fn plan_reconcile<C, S>(
    existing: Vec<S>,
    incoming: Vec<C>,
    stored_key: impl Fn(&S) -> &str,
    candidate_key: impl Fn(&C) -> &str,
) -> ReconcilePlan<C, S> {
    // Last-write-wins dedup: a later candidate with the same key replaces
    // the earlier one while keeping a deterministic order.
    let mut slots: Vec<Option<C>> = Vec::with_capacity(incoming.len());
    let mut last_position: HashMap<String, usize> = HashMap::new();
    let mut duplicate_keys = Vec::new();

    for candidate in incoming {
        let key = candidate_key(&candidate).to_string();
        if let Some(&previous) = last_position.get(&key) {
            slots[previous] = None;
            duplicate_keys.push(key.clone());
        }
        last_position.insert(key, slots.len());
        slots.push(Some(candidate));
    }

    let mut to_create = Vec::new();
    let mut to_update = Vec::new();
    let mut matched: HashSet<String> = HashSet::new();

    {
        let index = IdentityIndex::build(&existing, &stored_key);
        for candidate in slots.into_iter().flatten() {
            let key = candidate_key(&candidate).to_string();
            if index.get(&key).is_some() {
                matched.insert(key.clone());
                to_update.push((key, candidate));
            } else {
                to_create.push(candidate);
            }
        }
    }

    let to_missing = existing
        .into_iter()
        .filter(|stored| !matched.contains(stored_key(stored)))
        .collect();

    ReconcilePlan {
        to_create,
        to_update,
        to_missing,
        duplicate_keys,
    }
}

#[cfg(test)]
mod tests {
    use super::plan_reconcile;

    fn key_of(pair: &(String, u32)) -> &str {
        pair.0.as_str()
    }

    fn record(key: &str, value: u32) -> (String, u32) {
        (key.to_string(), value)
    }

    #[test]
    fn classifies_create_update_and_missing() {
        let existing = vec![record("a", 1), record("b", 2)];
        let incoming = vec![record("a", 10), record("c", 30)];

        let plan = plan_reconcile(existing, incoming, key_of, key_of);

        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].0, "a");
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_create[0].0, "c");
        assert_eq!(plan.to_missing.len(), 1);
        assert_eq!(plan.to_missing[0].0, "b");
        assert!(plan.duplicate_keys.is_empty());
    }

    #[test]
    fn duplicate_identity_resolves_last_write_wins() {
        let incoming = vec![record("task_1", 1), record("task_1", 2)];

        let plan = plan_reconcile(Vec::new(), incoming, key_of, key_of);

        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_create[0].1, 2, "later candidate must survive");
        assert_eq!(plan.duplicate_keys, vec!["task_1".to_string()]);
    }

    #[test]
    fn duplicate_identity_with_existing_match_updates_with_later_candidate() {
        let existing = vec![record("task_1", 0)];
        let incoming = vec![record("task_1", 1), record("task_1", 2)];

        let plan = plan_reconcile(existing, incoming, key_of, key_of);

        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].1 .1, 2);
        assert!(plan.to_missing.is_empty());
    }

    #[test]
    fn empty_key_candidates_are_created_not_matched() {
        let existing = vec![record("", 1)];
        let incoming = vec![record("", 2)];

        let plan = plan_reconcile(existing, incoming, key_of, key_of);

        // The stored empty-key record is unmatched by design, so it goes
        // through the missing phase before the create re-inserts.
        assert_eq!(plan.to_create.len(), 1);
        assert!(plan.to_update.is_empty());
        assert_eq!(plan.to_missing.len(), 1);
    }

    #[test]
    fn identical_snapshot_plans_updates_only() {
        let existing = vec![record("a", 1), record("b", 2)];
        let incoming = vec![record("a", 1), record("b", 2)];

        let plan = plan_reconcile(existing, incoming, key_of, key_of);

        assert!(plan.to_create.is_empty());
        assert!(plan.to_missing.is_empty());
        assert_eq!(plan.to_update.len(), 2);
    }
}
