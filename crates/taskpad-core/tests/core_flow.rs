use std::fs;

use chrono::{Local, TimeZone};
use taskpad_core::app::{AppState, Dialog};
use taskpad_core::clock::FixedClock;
use taskpad_core::datastore::TaskFile;
use tempfile::tempdir;

#[test]
fn add_complete_save_and_reload() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("tasks.txt");
    let at = Local
        .with_ymd_and_hms(2026, 10, 17, 9, 5, 0)
        .single()
        .expect("valid local time");

    let mut state = AppState::with_clock(TaskFile::new(&path), Box::new(FixedClock(at)));
    state.input = "Buy milk".to_string();
    state.add_task().expect("add task");
    assert_eq!(state.tasks().as_slice(), &["[09:05] Buy milk".to_string()]);
    assert_eq!(state.counter_text(), "Tasks: 1");

    state.select(Some(0));
    state.toggle_selected().expect("mark complete");
    assert_eq!(state.tasks().get(0), Some("✓ [09:05] Buy milk"));

    let outcome = state.save_tasks().expect("save tasks");
    assert_eq!(
        outcome.dialog,
        Some(Dialog::Success("1 tasks saved successfully".to_string()))
    );
    assert_eq!(
        fs::read_to_string(&path).expect("read task file"),
        "✓ [09:05] Buy milk\n"
    );

    let mut fresh = AppState::with_clock(TaskFile::new(&path), Box::new(FixedClock(at)));
    assert!(fresh.tasks().is_empty());
    fresh.load_tasks().expect("load tasks");
    assert_eq!(fresh.tasks().as_slice(), &["✓ [09:05] Buy milk".to_string()]);
    assert_eq!(fresh.counter_text(), "Tasks: 1");
    assert_eq!(fresh.status(), "Loaded 1 tasks from tasks.txt");
}

#[test]
fn save_then_load_keeps_content_and_order() {
    let temp = tempdir().expect("tempdir");
    let file = TaskFile::new(temp.path().join("tasks.txt"));
    let entries = vec![
        "[12:00] lunch".to_string(),
        "✓ [08:15] coffee".to_string(),
        "[12:00] lunch".to_string(),
        "no stamp at all".to_string(),
    ];

    let mut state = AppState::new(file.clone());
    fs::write(file.path(), entries.join("\n") + "\n").expect("seed");
    state.load_tasks().expect("load");
    state.save_tasks().expect("save");

    let mut reloaded = AppState::new(file);
    reloaded.load_tasks().expect("reload");
    assert_eq!(reloaded.tasks().as_slice(), entries.as_slice());
}
