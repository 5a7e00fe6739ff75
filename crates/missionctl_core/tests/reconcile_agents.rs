use missionctl_core::db::open_db_in_memory;
use missionctl_core::sync::{reconcile, ReconcileStore};
use missionctl_core::{AgentCandidate, AgentStatus, SqliteAgentStore};

fn agent(name: &str, role: &str, status: AgentStatus) -> AgentCandidate {
    AgentCandidate {
        name: name.to_string(),
        role: role.to_string(),
        status,
        current_task: None,
    }
}

#[test]
fn disappeared_agent_is_marked_offline_and_retained() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgentStore::new(&conn);

    reconcile(
        &store,
        vec![agent("jake", "coder", AgentStatus::Working)],
        1_000,
    )
    .unwrap();

    // Empty session list: jake is gone from the snapshot.
    let outcome = reconcile(&store, Vec::new(), 2_000).unwrap();
    assert_eq!(outcome.removed_or_marked, 1);
    assert_eq!(outcome.created, 0);

    let jake = store.get_by_key("jake").unwrap().unwrap();
    assert_eq!(jake.status, AgentStatus::Offline);
    assert_eq!(jake.role, "coder", "role history must survive retirement");
    assert_eq!(jake.last_active, 2_000);
    assert_eq!(jake.created_at, 1_000);
}

#[test]
fn reappearing_agent_comes_back_online_with_original_creation_stamp() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgentStore::new(&conn);

    reconcile(
        &store,
        vec![agent("jake", "coder", AgentStatus::Idle)],
        1_000,
    )
    .unwrap();
    reconcile(&store, Vec::new(), 2_000).unwrap();

    let mut back = agent("jake", "coder", AgentStatus::Working);
    back.current_task = Some("reviewing PR".to_string());
    let outcome = reconcile(&store, vec![back], 3_000).unwrap();
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.created, 0);

    let jake = store.get_by_key("jake").unwrap().unwrap();
    assert_eq!(jake.status, AgentStatus::Working);
    assert_eq!(jake.current_task.as_deref(), Some("reviewing PR"));
    assert_eq!(jake.created_at, 1_000);
}

#[test]
fn marking_an_already_offline_agent_refreshes_its_stamp() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgentStore::new(&conn);

    reconcile(
        &store,
        vec![agent("jake", "coder", AgentStatus::Idle)],
        1_000,
    )
    .unwrap();
    reconcile(&store, Vec::new(), 2_000).unwrap();
    let outcome = reconcile(&store, Vec::new(), 3_000).unwrap();

    // State-wise a no-op, but still pass-stamped and counted.
    assert_eq!(outcome.removed_or_marked, 1);
    let jake = store.get_by_key("jake").unwrap().unwrap();
    assert_eq!(jake.status, AgentStatus::Offline);
    assert_eq!(jake.last_active, 3_000);
}

#[test]
fn agents_are_never_deleted_by_reconciliation() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgentStore::new(&conn);

    let crew = vec![
        agent("jake", "coder", AgentStatus::Working),
        agent("ada", "researcher", AgentStatus::Idle),
    ];
    reconcile(&store, crew, 1_000).unwrap();
    reconcile(&store, vec![agent("ada", "researcher", AgentStatus::Working)], 2_000).unwrap();
    reconcile(&store, Vec::new(), 3_000).unwrap();

    let agents = store.scan_all().unwrap();
    assert_eq!(agents.len(), 2);
    assert!(agents
        .iter()
        .all(|a| a.status == AgentStatus::Offline));
}
