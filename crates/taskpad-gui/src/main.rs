mod background;
mod dialogs;
mod shell;
mod theme;

use std::path::PathBuf;

use eframe::egui;
use taskpad_core::app::AppState;
use taskpad_core::config::Config;
use tracing::{
  error,
  info,
  warn
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

fn init_tracing() {
  let filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          "info,taskpad_gui=debug,\
           taskpad_core=debug"
        )
      })
      .unwrap_or_else(|_| {
        EnvFilter::new("info")
      });

  let _ =
    tracing_subscriber::registry()
      .with(filter)
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
      )
      .try_init();
}

fn load_config() -> Config {
  match Config::load(None) {
    | Ok(cfg) => cfg,
    | Err(err) => {
      let message = format!("{err:#}");
      warn!(
        error = %message,
        "failed to load rc file; \
         using defaults"
      );
      Config::default()
    }
  }
}

fn window_size(
  cfg: &Config,
  width_key: &str,
  height_key: &str,
  fallback: [f32; 2]
) -> [f32; 2] {
  let read = |key: &str,
              default: f32| {
    match cfg.get_f32(key) {
      | Ok(Some(value))
        if value > 0.0 =>
      {
        value
      }
      | Ok(_) => default,
      | Err(err) => {
        warn!(
          key,
          error = %err,
          "ignoring window setting"
        );
        default
      }
    }
  };
  [
    read(width_key, fallback[0]),
    read(height_key, fallback[1])
  ]
}

fn exe_dir() -> Option<PathBuf> {
  std::env::current_exe()
    .ok()
    .and_then(|exe| {
      exe
        .parent()
        .map(|dir| dir.to_path_buf())
    })
}

fn main() {
  init_tracing();
  info!("starting taskpad GUI");

  let cfg = load_config();
  let state =
    AppState::new(cfg.task_file());
  let candidates = cfg
    .background_candidates(
      exe_dir().as_deref()
    );

  let options = eframe::NativeOptions {
    viewport:
      egui::ViewportBuilder::default()
        .with_title(shell::WINDOW_TITLE)
        .with_inner_size(window_size(
          &cfg,
          "window.width",
          "window.height",
          [1000.0, 700.0]
        ))
        .with_min_inner_size(
          window_size(
            &cfg,
            "window.min_width",
            "window.min_height",
            [800.0, 600.0]
          )
        ),
    ..Default::default()
  };

  let result = eframe::run_native(
    "taskpad",
    options,
    Box::new(move |cc| {
      Ok(Box::new(
        shell::TaskpadApp::new(
          cc,
          state,
          &candidates
        )
      ))
    })
  );

  if let Err(err) = result {
    error!(
      error = %err,
      "GUI event loop failed"
    );
    std::process::exit(1);
  }
}
