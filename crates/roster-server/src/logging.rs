//! Tracing setup for the server binary.
//!
//! | Mode     | Output                               | Default level |
//! |----------|--------------------------------------|---------------|
//! | `silent` | nothing                              | n/a           |
//! | `local`  | human-readable text on stdout        | `debug`       |
//! | `dev`    | JSON lines in `log/dev/dev.log.json` | `debug`       |
//! | `prod`   | JSON lines in `log/log.json`         | `info`        |
//!
//! `RUST_LOG` overrides the default level in every mode but `silent`.

use std::{
  fs::OpenOptions,
  path::Path,
  sync::Arc,
};

use anyhow::Context as _;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
  Silent,
  #[default]
  Local,
  Dev,
  Prod,
}

impl LogMode {
  pub fn default_level(self) -> LevelFilter {
    match self {
      Self::Silent => LevelFilter::OFF,
      Self::Local | Self::Dev => LevelFilter::DEBUG,
      Self::Prod => LevelFilter::INFO,
    }
  }

  /// The JSON log file, for the modes that write one.
  pub fn file(self) -> Option<&'static Path> {
    match self {
      Self::Dev => Some(Path::new("log/dev/dev.log.json")),
      Self::Prod => Some(Path::new("log/log.json")),
      Self::Silent | Self::Local => None,
    }
  }
}

/// Install the global subscriber for `mode`. Log files are opened in append
/// mode and their directory is created if missing.
pub fn init(mode: LogMode) -> anyhow::Result<()> {
  if mode == LogMode::Silent {
    return Ok(());
  }

  let filter = EnvFilter::builder()
    .with_default_directive(mode.default_level().into())
    .from_env_lossy();

  let Some(path) = mode.file() else {
    tracing_subscriber::fmt().with_env_filter(filter).init();
    return Ok(());
  };

  if let Some(dir) = path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create log directory {dir:?}"))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("failed to open log file {path:?}"))?;

  tracing_subscriber::fmt()
    .json()
    .with_env_filter(filter)
    .with_writer(Arc::new(file))
    .init();
  Ok(())
}
