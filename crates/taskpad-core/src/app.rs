use tracing::{debug, info, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::datastore::TaskFile;
use crate::task;
use crate::task_list::TaskList;

pub const READY_STATUS: &str = "Ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearAll,
}

/// A modal message the front end has to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Warning(String),
    Info(String),
    Success(String),
    Confirm(ConfirmAction, String),
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Warning(_) => "Warning",
            Dialog::Info(_) => "Info",
            Dialog::Success(_) => "Success",
            Dialog::Confirm(..) => "Confirm",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Dialog::Warning(msg)
            | Dialog::Info(msg)
            | Dialog::Success(msg)
            | Dialog::Confirm(_, msg) => msg,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub dialog: Option<Dialog>,
}

impl Outcome {
    pub fn done() -> Self {
        Self::default()
    }

    pub fn with(dialog: Dialog) -> Self {
        Self {
            dialog: Some(dialog),
        }
    }
}

/// Everything the window shows, minus the pixels.
///
/// Each handler is one synchronous transition; the status text and the
/// counter only change through them.
pub struct AppState {
    tasks: TaskList,
    file: TaskFile,
    clock: Box<dyn Clock>,
    selection: Option<usize>,
    status: String,
    pub input: String,
}

impl AppState {
    pub fn new(file: TaskFile) -> Self {
        Self::with_clock(file, Box::new(SystemClock))
    }

    pub fn with_clock(file: TaskFile, clock: Box<dyn Clock>) -> Self {
        Self {
            tasks: TaskList::new(),
            file,
            clock,
            selection: None,
            status: READY_STATUS.to_string(),
            input: String::new(),
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn file(&self) -> &TaskFile {
        &self.file
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn counter_text(&self) -> String {
        format!("Tasks: {}", self.tasks.len())
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selection = index.filter(|idx| *idx < self.tasks.len());
    }

    /// Used when a handler fails outside the normal dialog flow.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    #[instrument(skip(self), fields(input_len = self.input.len()))]
    pub fn add_task(&mut self) -> anyhow::Result<Outcome> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            debug!("rejected blank task");
            return Ok(Outcome::with(Dialog::Warning(
                "You must enter a task.".to_string(),
            )));
        }

        let entry = task::stamp(&text, self.clock.now());
        self.tasks.push(entry);
        self.input.clear();
        self.status = format!("Task added: {text}");

        info!(count = self.tasks.len(), "task added");
        Ok(Outcome::done())
    }

    #[instrument(skip(self), fields(selection = ?self.selection))]
    pub fn remove_selected(&mut self) -> anyhow::Result<Outcome> {
        let Some(entry) = self.selection.and_then(|idx| self.tasks.remove(idx)) else {
            return Ok(Outcome::with(Dialog::Warning(
                "Please select a task to remove.".to_string(),
            )));
        };

        self.selection = None;
        self.status = format!("Task removed: {entry}");

        info!(count = self.tasks.len(), "task removed");
        Ok(Outcome::done())
    }

    #[instrument(skip(self), fields(selection = ?self.selection))]
    pub fn toggle_selected(&mut self) -> anyhow::Result<Outcome> {
        let toggled = self
            .selection
            .and_then(|idx| self.tasks.toggle(idx).map(|t| (idx, t)));
        let Some((index, toggled)) = toggled else {
            return Ok(Outcome::with(Dialog::Warning(
                "Please select a task to mark as complete.".to_string(),
            )));
        };

        self.status = if toggled.completed {
            format!("Task completed: {}", task::unmark(&toggled.entry))
        } else {
            format!("Task unmarked: {}", toggled.entry)
        };

        info!(index, completed = toggled.completed, "task toggled");
        Ok(Outcome::done())
    }

    /// Asks for confirmation; nothing changes until `confirm_clear`.
    pub fn request_clear(&self) -> Outcome {
        Outcome::with(Dialog::Confirm(
            ConfirmAction::ClearAll,
            "Are you sure you want to clear all tasks?".to_string(),
        ))
    }

    #[instrument(skip(self))]
    pub fn confirm_clear(&mut self, confirmed: bool) -> Outcome {
        if !confirmed {
            debug!("clear declined");
            return Outcome::done();
        }

        let removed = self.tasks.len();
        self.tasks.clear();
        self.selection = None;
        self.status = "All tasks cleared".to_string();

        info!(removed, "all tasks cleared");
        Outcome::done()
    }

    #[instrument(skip(self), fields(file = %self.file.path().display()))]
    pub fn save_tasks(&mut self) -> anyhow::Result<Outcome> {
        if self.tasks.is_empty() {
            return Ok(Outcome::with(Dialog::Info("No tasks to save".to_string())));
        }

        self.file.save(self.tasks.as_slice())?;

        let count = self.tasks.len();
        self.status = format!(
            "Tasks saved to {} ({count} tasks)",
            self.file.display_name()
        );
        Ok(Outcome::with(Dialog::Success(format!(
            "{count} tasks saved successfully"
        ))))
    }

    /// Writes the list as-is, empty or not, without touching the status.
    /// The command-line front end persists after every change with this.
    pub fn write_through(&self) -> anyhow::Result<()> {
        self.file.save(self.tasks.as_slice())
    }

    #[instrument(skip(self), fields(file = %self.file.path().display()))]
    pub fn load_tasks(&mut self) -> anyhow::Result<Outcome> {
        let Some(entries) = self.file.load()? else {
            warn!("no saved task file; keeping current list");
            self.status = "No saved tasks found".to_string();
            return Ok(Outcome::done());
        };

        let count = entries.len();
        self.tasks.replace_all(entries);
        self.selection = None;
        self.status = format!("Loaded {count} tasks from {}", self.file.display_name());
        Ok(Outcome::done())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{Local, TimeZone};
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::clock::FixedClock;

    fn state_at(hour: u32, minute: u32) -> (TempDir, AppState) {
        let dir = tempdir().expect("tempdir");
        let at = Local
            .with_ymd_and_hms(2026, 10, 17, hour, minute, 0)
            .single()
            .expect("valid local time");
        let state = AppState::with_clock(
            TaskFile::new(dir.path().join("tasks.txt")),
            Box::new(FixedClock(at)),
        );
        (dir, state)
    }

    fn add(state: &mut AppState, text: &str) {
        state.input = text.to_string();
        let outcome = state.add_task().expect("add");
        assert_eq!(outcome, Outcome::done());
    }

    #[test]
    fn starts_ready_and_empty() {
        let (_dir, state) = state_at(9, 5);
        assert_eq!(state.status(), "Ready");
        assert_eq!(state.counter_text(), "Tasks: 0");
    }

    #[test]
    fn add_trims_stamps_and_clears_input() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "   Buy milk  ");

        assert_eq!(state.tasks().as_slice(), &["[09:05] Buy milk".to_string()]);
        assert_eq!(state.input, "");
        assert_eq!(state.status(), "Task added: Buy milk");
        assert_eq!(state.counter_text(), "Tasks: 1");
    }

    #[test]
    fn blank_add_warns_without_mutation() {
        let (_dir, mut state) = state_at(9, 5);
        state.input = " \t ".to_string();
        let outcome = state.add_task().expect("add");

        assert_eq!(
            outcome.dialog,
            Some(Dialog::Warning("You must enter a task.".to_string()))
        );
        assert!(state.tasks().is_empty());
        assert_eq!(state.status(), "Ready");
        assert_eq!(state.input, " \t ");
    }

    #[test]
    fn remove_requires_selection() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");
        let outcome = state.remove_selected().expect("remove");

        assert!(matches!(outcome.dialog, Some(Dialog::Warning(_))));
        assert_eq!(
            outcome.dialog.as_ref().map(Dialog::message),
            Some("Please select a task to remove.")
        );
        assert_eq!(state.tasks().len(), 1);
    }

    #[test]
    fn remove_deletes_only_selected() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");
        add(&mut state, "two");
        add(&mut state, "three");

        state.select(Some(1));
        state.remove_selected().expect("remove");

        assert_eq!(
            state.tasks().as_slice(),
            &["[09:05] one".to_string(), "[09:05] three".to_string()]
        );
        assert_eq!(state.status(), "Task removed: [09:05] two");
        assert_eq!(state.counter_text(), "Tasks: 2");
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn toggle_requires_selection() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");
        let outcome = state.toggle_selected().expect("toggle");
        assert_eq!(
            outcome.dialog,
            Some(Dialog::Warning(
                "Please select a task to mark as complete.".to_string()
            ))
        );
        assert_eq!(state.tasks().get(0), Some("[09:05] one"));
    }

    #[test]
    fn toggle_twice_round_trips() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "Buy milk");
        state.select(Some(0));

        state.toggle_selected().expect("mark");
        assert_eq!(state.tasks().get(0), Some("✓ [09:05] Buy milk"));
        assert_eq!(state.status(), "Task completed: [09:05] Buy milk");
        assert_eq!(state.selection(), Some(0));

        state.toggle_selected().expect("unmark");
        assert_eq!(state.tasks().get(0), Some("[09:05] Buy milk"));
        assert_eq!(state.status(), "Task unmarked: [09:05] Buy milk");
    }

    #[test]
    fn select_out_of_range_is_no_selection() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");
        state.select(Some(4));
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn clear_asks_first() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");

        let outcome = state.request_clear();
        assert!(matches!(
            outcome.dialog,
            Some(Dialog::Confirm(ConfirmAction::ClearAll, _))
        ));
        assert_eq!(state.tasks().len(), 1);

        state.confirm_clear(false);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.status(), "Task added: one");

        state.confirm_clear(true);
        assert!(state.tasks().is_empty());
        assert_eq!(state.status(), "All tasks cleared");
        assert_eq!(state.counter_text(), "Tasks: 0");
    }

    #[test]
    fn clearing_empty_list_still_reports() {
        let (_dir, mut state) = state_at(9, 5);
        state.confirm_clear(true);
        assert!(state.tasks().is_empty());
        assert_eq!(state.status(), "All tasks cleared");
    }

    #[test]
    fn save_empty_list_does_not_touch_file() {
        let (_dir, mut state) = state_at(9, 5);
        let outcome = state.save_tasks().expect("save");

        assert_eq!(
            outcome.dialog,
            Some(Dialog::Info("No tasks to save".to_string()))
        );
        assert!(!state.file().path().exists());
        assert_eq!(state.status(), "Ready");
    }

    #[test]
    fn save_reports_count() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "one");
        add(&mut state, "two");

        let outcome = state.save_tasks().expect("save");
        assert_eq!(
            outcome.dialog,
            Some(Dialog::Success("2 tasks saved successfully".to_string()))
        );
        assert_eq!(state.status(), "Tasks saved to tasks.txt (2 tasks)");
        assert_eq!(
            fs::read_to_string(state.file().path()).expect("read"),
            "[09:05] one\n[09:05] two\n"
        );
    }

    #[test]
    fn load_without_file_keeps_list() {
        let (_dir, mut state) = state_at(9, 5);
        add(&mut state, "keep me");

        state.load_tasks().expect("load");
        assert_eq!(state.tasks().as_slice(), &["[09:05] keep me".to_string()]);
        assert_eq!(state.status(), "No saved tasks found");
        assert_eq!(state.counter_text(), "Tasks: 1");
    }

    #[test]
    fn load_replaces_list_wholesale() {
        let (_dir, mut state) = state_at(9, 5);
        fs::write(state.file().path(), "[07:00] x\n✓ [07:10] y\n").expect("seed");
        add(&mut state, "discarded");
        state.select(Some(0));

        state.load_tasks().expect("load");
        assert_eq!(
            state.tasks().as_slice(),
            &["[07:00] x".to_string(), "✓ [07:10] y".to_string()]
        );
        assert_eq!(state.status(), "Loaded 2 tasks from tasks.txt");
        assert_eq!(state.counter_text(), "Tasks: 2");
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn load_counts_blank_and_marker_only_lines() {
        let (_dir, mut state) = state_at(9, 5);
        fs::write(state.file().path(), "a\n\n✓ \n").expect("seed");

        state.load_tasks().expect("load");
        assert_eq!(
            state.tasks().as_slice(),
            &["a".to_string(), String::new(), "✓".to_string()]
        );
        assert_eq!(state.status(), "Loaded 3 tasks from tasks.txt");
        assert_eq!(state.counter_text(), "Tasks: 3");
    }

    #[test]
    fn save_error_propagates() {
        let (dir, mut state) = state_at(9, 5);
        let blocked = dir.path().join("not-a-dir");
        fs::write(&blocked, "").expect("seed");
        let mut state_bad = AppState::with_clock(
            TaskFile::new(blocked.join("tasks.txt")),
            Box::new(FixedClock(state.clock().now())),
        );
        add(&mut state_bad, "one");
        assert!(state_bad.save_tasks().is_err());

        add(&mut state, "still fine");
        assert!(state.save_tasks().is_ok());
    }
}
