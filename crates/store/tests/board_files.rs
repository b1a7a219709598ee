//! End-to-end checks of a board directory: config, task files and the
//! snapshot the terminal board builds from them.

use taskwatch_config::Config;
use taskwatch_protocol::{BoardSnapshot, Priority, Task, TaskStore};
use taskwatch_store::FileStore;
use tempfile::TempDir;

fn board() -> (TempDir, Config, FileStore) {
    let dir = TempDir::new().unwrap();
    let config = Config::new("itest").with_dir(dir.path()).init().unwrap();
    let store = FileStore::from_config(&config);
    (dir, config, store)
}

#[test]
fn snapshot_reflects_files_on_disk() {
    let (_dir, config, store) = board();
    store
        .insert(&Task::new(1, "Write docs", "todo"))
        .unwrap();
    store
        .insert(&Task::new(2, "Fix crash", "todo").with_priority(Priority::Critical))
        .unwrap();
    store.insert(&Task::new(3, "Deploy", "done")).unwrap();
    store.insert(&Task::new(4, "Old", "archived")).unwrap();

    let listing = store.list_all().unwrap();
    let snapshot = BoardSnapshot::build(listing.tasks, &config.display_statuses());

    assert_eq!(snapshot.total, 3);
    let todo = &snapshot.columns[1];
    assert_eq!(todo.status, "todo");
    assert_eq!(
        todo.tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![2, 1]
    );
    assert_eq!(snapshot.columns[4].tasks[0].title, "Deploy");
}

#[test]
fn archived_task_leaves_the_board() {
    let (_dir, config, store) = board();
    store.insert(&Task::new(1, "a", "todo")).unwrap();
    store.insert(&Task::new(2, "b", "review")).unwrap();

    store.archive(2).unwrap();

    let snapshot = BoardSnapshot::build(store.list_all().unwrap().tasks, &config.display_statuses());
    assert_eq!(snapshot.total, 1);
    assert!(snapshot.columns.iter().all(|c| c.tasks.iter().all(|t| t.id == 1)));
}

#[test]
fn clear_all_empties_the_board() {
    let (_dir, config, store) = board();
    for id in 1..=4 {
        store.insert(&Task::new(id, format!("task {id}"), "todo")).unwrap();
    }

    assert_eq!(store.archive_all().unwrap(), 4);
    let snapshot = BoardSnapshot::build(store.list_all().unwrap().tasks, &config.display_statuses());
    assert_eq!(snapshot.total, 0);
    assert_eq!(snapshot.placed(), 0);
}

#[test]
fn activity_log_lives_in_board_dir() {
    let (dir, _config, store) = board();
    store.insert(&Task::new(1, "a", "todo")).unwrap();
    store.archive(1).unwrap();
    assert!(dir.path().join("activity.jsonl").is_file());
}
