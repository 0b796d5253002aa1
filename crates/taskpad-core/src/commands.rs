use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::app::{AppState, Dialog, Outcome};
use crate::cli::Command;
use crate::config::Config;
use crate::render::Renderer;
use crate::task;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    index: usize,
    #[serde(flatten)]
    parts: task::TaskParts<'a>,
    entry: &'a str,
}

#[instrument(skip(state, cfg, renderer))]
pub fn dispatch(
    state: &mut AppState,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(file = %state.file().path().display(), "dispatching command");

    match command {
        Command::List => cmd_list(state, renderer),
        Command::Add { text } => cmd_add(state, &text),
        Command::Done { index } => cmd_done(state, index),
        Command::Remove { index } => cmd_remove(state, index),
        Command::Clear { yes } => {
            let stdin = io::stdin();
            cmd_clear(state, yes, &mut stdin.lock(), &mut io::stdout())
        }
        Command::Export => cmd_export(state),
        Command::Show => cmd_show(cfg),
    }
}

fn load_existing(state: &mut AppState) -> anyhow::Result<()> {
    state.load_tasks()?;
    debug!(status = %state.status(), "loaded task file");
    Ok(())
}

/// Warnings become errors; everything else is printed.
fn report(outcome: Outcome) -> anyhow::Result<()> {
    match outcome.dialog {
        Some(Dialog::Warning(msg)) => Err(anyhow!(msg)),
        Some(dialog) => {
            println!("{}", dialog.message());
            Ok(())
        }
        None => Ok(()),
    }
}

fn select_one_based(state: &mut AppState, index: usize) {
    state.select(index.checked_sub(1));
}

#[instrument(skip(state, renderer))]
fn cmd_list(state: &mut AppState, renderer: &mut Renderer) -> anyhow::Result<()> {
    info!("command list");
    load_existing(state)?;
    if state.tasks().is_empty() {
        println!("{}", state.status());
        return Ok(());
    }
    renderer.print_task_table(state.tasks().as_slice())?;
    println!("{}", state.counter_text());
    Ok(())
}

#[instrument(skip(state, words))]
fn cmd_add(state: &mut AppState, words: &[String]) -> anyhow::Result<()> {
    info!("command add");
    load_existing(state)?;

    state.input = words.join(" ");
    report(state.add_task()?)?;
    state.write_through()?;

    println!("{}", state.status());
    Ok(())
}

#[instrument(skip(state))]
fn cmd_done(state: &mut AppState, index: usize) -> anyhow::Result<()> {
    info!("command done");
    load_existing(state)?;

    select_one_based(state, index);
    report(state.toggle_selected()?)?;
    state.write_through()?;

    println!("{}", state.status());
    Ok(())
}

#[instrument(skip(state))]
fn cmd_remove(state: &mut AppState, index: usize) -> anyhow::Result<()> {
    info!("command remove");
    load_existing(state)?;

    select_one_based(state, index);
    report(state.remove_selected()?)?;
    state.write_through()?;

    println!("{}", state.status());
    Ok(())
}

#[instrument(skip(state, input, output))]
fn cmd_clear<R: BufRead, W: Write>(
    state: &mut AppState,
    yes: bool,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    info!("command clear");
    load_existing(state)?;

    let confirmed = if yes {
        true
    } else {
        let prompt = state.request_clear();
        let question = prompt.dialog.as_ref().map(Dialog::message).unwrap_or_default();
        write!(output, "{question} [y/N] ")?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    };

    report(state.confirm_clear(confirmed))?;
    if !confirmed {
        return Ok(());
    }

    state.write_through()?;
    writeln!(output, "{}", state.status())?;
    Ok(())
}

#[instrument(skip(state))]
fn cmd_export(state: &mut AppState) -> anyhow::Result<()> {
    info!("command export");
    load_existing(state)?;

    let rows: Vec<ExportRow<'_>> = state
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, entry)| ExportRow {
            index: idx + 1,
            parts: task::parts(entry),
            entry,
        })
        .collect();

    let out = serde_json::to_string(&rows)?;
    println!("{out}");
    Ok(())
}

fn cmd_show(cfg: &Config) -> anyhow::Result<()> {
    let sorted: BTreeMap<&String, &String> = cfg.iter().collect();
    for (k, v) in sorted {
        println!("{k}={v}");
    }
    for path in &cfg.loaded_files {
        println!("# loaded {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use chrono::{Local, TimeZone};
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::clock::FixedClock;
    use crate::datastore::TaskFile;

    fn state() -> (TempDir, AppState) {
        let dir = tempdir().expect("tempdir");
        let at = Local
            .with_ymd_and_hms(2026, 10, 17, 18, 45, 0)
            .single()
            .expect("valid local time");
        let state = AppState::with_clock(
            TaskFile::new(dir.path().join("tasks.txt")),
            Box::new(FixedClock(at)),
        );
        (dir, state)
    }

    #[test]
    fn add_writes_through_to_file() {
        let (_dir, mut state) = state();
        cmd_add(&mut state, &["Water".to_string(), "plants".to_string()]).expect("add");
        assert_eq!(
            fs::read_to_string(state.file().path()).expect("read"),
            "[18:45] Water plants\n"
        );
    }

    #[test]
    fn blank_add_is_an_error() {
        let (_dir, mut state) = state();
        let err = cmd_add(&mut state, &["  ".to_string()]).expect_err("blank");
        assert_eq!(err.to_string(), "You must enter a task.");
        assert!(!state.file().path().exists());
    }

    #[test]
    fn done_and_remove_use_one_based_indices() {
        let (_dir, mut state) = state();
        fs::write(state.file().path(), "[08:00] a\n[08:01] b\n").expect("seed");

        cmd_done(&mut state, 2).expect("done");
        assert_eq!(
            fs::read_to_string(state.file().path()).expect("read"),
            "[08:00] a\n✓ [08:01] b\n"
        );

        assert!(cmd_remove(&mut state, 0).is_err());
        cmd_remove(&mut state, 1).expect("remove");
        cmd_remove(&mut state, 1).expect("remove last");
        assert_eq!(fs::read_to_string(state.file().path()).expect("read"), "");
    }

    #[test]
    fn clear_declined_keeps_file() {
        let (_dir, mut state) = state();
        fs::write(state.file().path(), "[08:00] a\n").expect("seed");

        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        cmd_clear(&mut state, false, &mut input, &mut output).expect("clear");

        let shown = String::from_utf8(output).expect("utf8");
        assert_eq!(shown, "Are you sure you want to clear all tasks? [y/N] ");
        assert_eq!(
            fs::read_to_string(state.file().path()).expect("read"),
            "[08:00] a\n"
        );
    }

    #[test]
    fn clear_confirmed_empties_file() {
        let (_dir, mut state) = state();
        fs::write(state.file().path(), "[08:00] a\n").expect("seed");

        let mut input = Cursor::new(b"y\n".to_vec());
        let mut output = Vec::new();
        cmd_clear(&mut state, false, &mut input, &mut output).expect("clear");

        assert!(String::from_utf8(output).expect("utf8").ends_with("All tasks cleared\n"));
        assert_eq!(fs::read_to_string(state.file().path()).expect("read"), "");
    }

    #[test]
    fn export_row_flattens_parts() {
        let row = ExportRow {
            index: 1,
            parts: task::parts("✓ [09:05] Buy milk"),
            entry: "✓ [09:05] Buy milk",
        };
        let value = serde_json::to_value(&row).expect("serialize");
        assert_eq!(value["index"], 1);
        assert_eq!(value["completed"], true);
        assert_eq!(value["stamp"], "09:05");
        assert_eq!(value["text"], "Buy milk");
        assert_eq!(value["entry"], "✓ [09:05] Buy milk");
    }
}
