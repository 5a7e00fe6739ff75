use missionctl_core::db::open_db_in_memory;
use missionctl_core::{
    run_sync, AgentCandidate, AgentStatus, EntityKind, SnapshotSet, TaskCandidate, TaskStatus,
};

fn task(id: &str, title: &str) -> TaskCandidate {
    TaskCandidate {
        id: id.to_string(),
        title: title.to_string(),
        status: TaskStatus::Todo,
        category: None,
        priority: None,
        completed_at: None,
    }
}

fn agent(name: &str) -> AgentCandidate {
    AgentCandidate {
        name: name.to_string(),
        role: "coder".to_string(),
        status: AgentStatus::Working,
        current_task: None,
    }
}

#[test]
fn only_provided_kinds_are_reconciled() {
    let conn = open_db_in_memory().unwrap();

    let mut snapshots = SnapshotSet::new();
    snapshots.tasks = Some(vec![task("task_1", "one")]);
    snapshots.agents = Some(vec![agent("jake")]);

    let report = run_sync(&conn, snapshots);

    assert!(!report.has_failures());
    let kinds: Vec<EntityKind> = report.results.iter().map(|entry| entry.kind).collect();
    assert_eq!(kinds, vec![EntityKind::Task, EntityKind::Agent]);
}

#[test]
fn a_failing_kind_does_not_mask_the_others() {
    let conn = open_db_in_memory().unwrap();
    // Simulate a broken store for one kind only.
    conn.execute_batch("DROP TABLE events;").unwrap();

    let mut snapshots = SnapshotSet::new();
    snapshots.tasks = Some(vec![task("task_1", "one")]);
    snapshots.events = Some(Vec::new());
    snapshots.agents = Some(vec![agent("jake")]);

    let report = run_sync(&conn, snapshots);
    assert!(report.has_failures());

    for entry in &report.results {
        match entry.kind {
            EntityKind::Event => assert!(entry.result.is_err()),
            _ => assert!(entry.result.is_ok(), "kind {} must succeed", entry.kind),
        }
    }
}

#[test]
fn empty_snapshot_is_authoritative() {
    let conn = open_db_in_memory().unwrap();

    let mut seed = SnapshotSet::new();
    seed.tasks = Some(vec![task("task_1", "one"), task("task_2", "two")]);
    run_sync(&conn, seed);

    let mut wipe = SnapshotSet::new();
    wipe.tasks = Some(Vec::new());
    let report = run_sync(&conn, wipe);

    let outcome = report.results[0].result.as_ref().unwrap();
    assert_eq!(outcome.removed_or_marked, 2);
    assert_eq!(outcome.created, 0);

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}
