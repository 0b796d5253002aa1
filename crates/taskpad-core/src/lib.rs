pub mod app;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;
pub mod task;
pub mod task_list;

use std::ffi::OsString;

use clap::Parser;
use tracing::{debug, info};

/// Entry point of the `taskpad` command-line front end.
#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args)?;
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting taskpad CLI"
    );
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.taskpadrc.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.into_iter().map(|kv| (kv.key, kv.value))),
    );

    let file = match cli.file {
        Some(path) => datastore::TaskFile::new(path),
        None => cfg.task_file(),
    };

    let mut state = app::AppState::new(file);
    let mut renderer = render::Renderer::new(&cfg)?;

    commands::dispatch(
        &mut state,
        &cfg,
        &mut renderer,
        cli.command.unwrap_or(cli::Command::List),
    )?;

    info!("done");
    Ok(())
}
