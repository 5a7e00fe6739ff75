use missionctl_core::db::open_db_in_memory;
use missionctl_core::sync::{apply_plan, plan_reconcile, reconcile, ReconcileStore};
use missionctl_core::{SqliteTaskStore, TaskCandidate, TaskPriority, TaskStatus};
use std::collections::HashSet;

fn candidate(id: &str, title: &str, status: TaskStatus) -> TaskCandidate {
    TaskCandidate {
        id: id.to_string(),
        title: title.to_string(),
        status,
        category: Some("General".to_string()),
        priority: Some(TaskPriority::Medium),
        completed_at: None,
    }
}

#[test]
fn snapshot_mix_updates_deletes_and_creates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let first = vec![
        candidate("task_a", "a", TaskStatus::Done),
        candidate("task_b", "b", TaskStatus::Todo),
    ];
    reconcile(&store, first, 1_000).unwrap();

    let second = vec![
        candidate("task_a", "a", TaskStatus::Todo),
        candidate("task_c", "c", TaskStatus::Todo),
    ];
    let outcome = reconcile(&store, second, 2_000).unwrap();

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.removed_or_marked, 1);
    assert_eq!(outcome.skipped, 0);

    let a = store.get_by_key("task_a").unwrap().unwrap();
    assert_eq!(a.status, TaskStatus::Todo);
    assert!(store.get_by_key("task_b").unwrap().is_none(), "b must be hard-deleted");
    assert!(store.get_by_key("task_c").unwrap().is_some());
}

#[test]
fn reconcile_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let snapshot = vec![
        candidate("task_a", "a", TaskStatus::Todo),
        candidate("task_b", "b", TaskStatus::Done),
    ];

    let first = reconcile(&store, snapshot.clone(), 1_000).unwrap();
    assert_eq!(first.created, 2);

    let second = reconcile(&store, snapshot, 2_000).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.removed_or_marked, 0);
    // Reconciliation is pass-stamped, not content-diffed.
    assert_eq!(second.updated, 2);

    let tasks = store.scan_all().unwrap();
    assert_eq!(tasks.len(), 2);
    for task in &tasks {
        assert_eq!(task.updated_at, 2_000);
    }
}

#[test]
fn creation_timestamp_is_set_once_and_never_altered() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let snapshot = vec![candidate("task_a", "a", TaskStatus::Todo)];
    reconcile(&store, snapshot.clone(), 1_000).unwrap();
    reconcile(&store, snapshot.clone(), 2_000).unwrap();
    reconcile(&store, snapshot, 3_000).unwrap();

    let task = store.get_by_key("task_a").unwrap().unwrap();
    assert_eq!(task.created_at, 1_000);
    assert_eq!(task.updated_at, 3_000);
}

#[test]
fn duplicate_identity_in_snapshot_resolves_last_write_wins() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let snapshot = vec![
        candidate("task_1", "first title", TaskStatus::Todo),
        candidate("task_1", "second title", TaskStatus::Done),
    ];
    let outcome = reconcile(&store, snapshot, 1_000).unwrap();
    assert_eq!(outcome.created, 1);

    let stored = store.get_by_key("task_1").unwrap().unwrap();
    assert_eq!(stored.title, "second title");
    assert_eq!(stored.status, TaskStatus::Done);
}

#[test]
fn vanished_patch_target_is_skipped_without_aborting_the_batch() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let seed = vec![
        candidate("task_1", "one", TaskStatus::Todo),
        candidate("task_9", "nine", TaskStatus::Todo),
    ];
    reconcile(&store, seed, 1_000).unwrap();

    let incoming = vec![
        candidate("task_1", "one updated", TaskStatus::Done),
        candidate("task_9", "nine updated", TaskStatus::Done),
        candidate("task_new", "new", TaskStatus::Todo),
    ];
    let existing = store.scan_all().unwrap();
    let plan = plan_reconcile(
        existing,
        incoming,
        |stored| store.stored_key(stored),
        |c| store.candidate_key(c),
    );

    // Concurrent actor removes task_9 between scan and apply.
    conn.execute("DELETE FROM tasks WHERE sync_id = 'task_9';", [])
        .unwrap();

    let outcome = apply_plan(&store, plan, 2_000).unwrap();
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.created, 1);

    let one = store.get_by_key("task_1").unwrap().unwrap();
    assert_eq!(one.title, "one updated");
    assert!(store.get_by_key("task_new").unwrap().is_some());
}

#[test]
fn updates_clear_fields_absent_from_the_candidate() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    reconcile(
        &store,
        vec![candidate("task_a", "a", TaskStatus::Todo)],
        1_000,
    )
    .unwrap();

    let mut bare = candidate("task_a", "a", TaskStatus::Todo);
    bare.category = None;
    bare.priority = None;
    reconcile(&store, vec![bare], 2_000).unwrap();

    let stored = store.get_by_key("task_a").unwrap().unwrap();
    assert_eq!(stored.category, None, "full replace, not field merge");
    assert_eq!(stored.priority, None);
}

#[test]
fn no_two_stored_records_share_an_identity_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::new(&conn);

    let snapshot = vec![
        candidate("task_1", "x", TaskStatus::Todo),
        candidate("task_1", "y", TaskStatus::Todo),
        candidate("task_2", "z", TaskStatus::Todo),
    ];
    reconcile(&store, snapshot.clone(), 1_000).unwrap();
    reconcile(&store, snapshot, 2_000).unwrap();

    let tasks = store.scan_all().unwrap();
    let keys: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(keys.len(), tasks.len());
}
