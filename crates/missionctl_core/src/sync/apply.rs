//! Apply engine: execute one kind's planned actions against the store.
//!
//! # Responsibility
//! - Run the three phases in order: missing, updates, creates.
//! - Dispatch the missing phase on the kind's disappearance policy.
//! - Count outcomes and downgrade stale references to logged skips.
//!
//! # Invariants
//! - Each action is an independent store operation; there is no spanning
//!   transaction. Re-running the same snapshot against a partially applied
//!   store converges to the same end state.
//! - A `NotFound` from one action increments `skipped` and the batch
//!   continues; any other store error aborts the remaining phases of this
//!   kind's batch.

use crate::model::kind::MissingPolicy;
use crate::repo::RepoError;
use crate::sync::plan::{plan_reconcile, ReconcilePlan};
use crate::sync::{ReconcileStore, SyncError, SyncOutcome, SyncPhase};
use log::warn;

/// Reconciles one kind: scan, plan, apply.
///
/// `now_ms` is the pass stamp written to every touched record.
pub fn reconcile<R: ReconcileStore>(
    store: &R,
    incoming: Vec<R::Candidate>,
    now_ms: i64,
) -> Result<SyncOutcome, SyncError> {
    let kind = store.kind();

    let existing = store.scan_all().map_err(|source| SyncError {
        kind,
        phase: SyncPhase::Scan,
        source,
    })?;

    let plan = plan_reconcile(
        existing,
        incoming,
        |stored| store.stored_key(stored),
        |candidate| store.candidate_key(candidate),
    );

    for key in &plan.duplicate_keys {
        warn!(
            "event=sync_plan module=sync status=warn kind={kind} reason=duplicate_identity key={key}"
        );
    }

    apply_plan(store, plan, now_ms)
}

/// Applies a precomputed plan. Exposed separately so callers and tests can
/// interleave store mutations between planning and applying.
pub fn apply_plan<R: ReconcileStore>(
    store: &R,
    plan: ReconcilePlan<R::Candidate, R::Stored>,
    now_ms: i64,
) -> Result<SyncOutcome, SyncError> {
    let kind = store.kind();
    let policy = kind.missing_policy();
    let mut outcome = SyncOutcome::empty(kind);

    for stored in &plan.to_missing {
        let key = store.stored_key(stored);
        let result = match policy {
            MissingPolicy::HardDelete => store.delete_by_key(key),
            MissingPolicy::SoftMark => store.soft_mark_missing(key, now_ms),
        };
        match result {
            Ok(()) => outcome.removed_or_marked += 1,
            Err(RepoError::NotFound { .. }) => {
                log_skip(store, SyncPhase::Missing, key);
                outcome.skipped += 1;
            }
            Err(source) => {
                return Err(SyncError {
                    kind,
                    phase: SyncPhase::Missing,
                    source,
                })
            }
        }
    }

    for (key, candidate) in &plan.to_update {
        match store.update(key, candidate, now_ms) {
            Ok(()) => outcome.updated += 1,
            Err(RepoError::NotFound { .. }) => {
                log_skip(store, SyncPhase::Update, key);
                outcome.skipped += 1;
            }
            Err(source) => {
                return Err(SyncError {
                    kind,
                    phase: SyncPhase::Update,
                    source,
                })
            }
        }
    }

    for candidate in &plan.to_create {
        match store.insert(candidate, now_ms) {
            Ok(()) => outcome.created += 1,
            Err(source) => {
                return Err(SyncError {
                    kind,
                    phase: SyncPhase::Create,
                    source,
                })
            }
        }
    }

    Ok(outcome)
}

fn log_skip<R: ReconcileStore>(store: &R, phase: SyncPhase, key: &str) {
    warn!(
        "event=sync_apply module=sync status=warn kind={} phase={phase} reason=stale_reference key={key}",
        store.kind()
    );
}
