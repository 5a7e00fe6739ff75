use missionctl_core::source::{
    collect_daily_logs, load_curated_memory, load_events_feed, load_sessions_feed, load_tasks_file,
    FeedError,
};
use missionctl_core::{AgentStatus, EventSource, MemoryKind, TaskStatus};
use std::fs;

#[test]
fn missing_tasks_file_yields_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = load_tasks_file(&dir.path().join("tasks.md")).unwrap();
    assert!(tasks.is_empty());
}

#[test]
fn tasks_file_parses_into_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.md");
    fs::write(&path, "## Physics\n- [x] solve problem set\n- [ ] read notes\n").unwrap();

    let tasks = load_tasks_file(&path).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].status, TaskStatus::Done);
    assert_eq!(tasks[0].category.as_deref(), Some("Physics"));
    assert_eq!(tasks[1].id, "task_read_notes");
}

#[test]
fn daily_logs_collect_newest_first_with_limit_and_truncation() {
    let dir = tempfile::tempdir().unwrap();

    // 22 dated files plus noise that must be ignored.
    for day in 1..=22 {
        let name = format!("2026-08-{day:02}.md");
        fs::write(dir.path().join(name), format!("log for day {day}")).unwrap();
    }
    fs::write(dir.path().join("tasks.md"), "- [ ] not a log").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let memories = collect_daily_logs(dir.path()).unwrap();
    assert_eq!(memories.len(), 20, "only the newest 20 logs are kept");
    assert_eq!(memories[0].id, "daily_2026-08-22");
    assert_eq!(memories[0].date, "2026-08-22");
    assert_eq!(memories[0].kind, MemoryKind::Daily);
    assert_eq!(memories.last().unwrap().id, "daily_2026-08-03");

    // Long content is truncated to 1000 chars.
    let long = "х".repeat(1_500);
    fs::write(dir.path().join("2026-08-23.md"), &long).unwrap();
    let memories = collect_daily_logs(dir.path()).unwrap();
    assert_eq!(memories[0].content.chars().count(), 1_000);
}

#[test]
fn missing_memory_dir_yields_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let memories = collect_daily_logs(&dir.path().join("memory")).unwrap();
    assert!(memories.is_empty());
}

#[test]
fn curated_memory_is_a_single_stable_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MEMORY.md");
    fs::write(&path, "# Memory\ncurated facts\n").unwrap();

    let memories = load_curated_memory(&path).unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories[0].id, "memory_curated");
    assert_eq!(memories[0].kind, MemoryKind::Curated);
    assert_eq!(
        memories[0].tags,
        vec!["memory".to_string(), "curated".to_string()]
    );

    assert!(load_curated_memory(&dir.path().join("absent.md"))
        .unwrap()
        .is_empty());
}

#[test]
fn events_feed_deserializes_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(
        &path,
        r#"[
            {"id": "evt_1", "title": "standup", "start_time": 9000,
             "end_time": null, "source": "cron", "description": null},
            {"id": "evt_2", "title": "review", "start_time": 14000,
             "end_time": 15000, "source": "google", "description": "weekly"}
        ]"#,
    )
    .unwrap();

    let events = load_events_feed(&path).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].source, EventSource::Cron);
    assert_eq!(events[1].end_time, Some(15_000));
}

#[test]
fn sessions_feed_deserializes_agents_and_missing_feed_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    fs::write(
        &path,
        r#"[{"name": "jake", "role": "coder", "status": "working", "current_task": "sync"}]"#,
    )
    .unwrap();

    let agents = load_sessions_feed(&path).unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].status, AgentStatus::Working);

    assert!(load_sessions_feed(&dir.path().join("absent.json"))
        .unwrap()
        .is_empty());
}

#[test]
fn malformed_feed_is_an_error_for_that_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(&path, "not json").unwrap();

    let err = load_events_feed(&path).unwrap_err();
    assert!(matches!(err, FeedError::Json(_)));
}
