//! roster-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the Roster API over HTTP until Ctrl+C or
//! SIGTERM.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use roster_server::{ServerConfig, app};
use roster_store_sqlite::SqliteStore;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Roster person registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;
  roster_server::logging::init(cfg.log_mode)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let served = serve(&cfg, store.clone()).await;
  if let Err(e) = &served {
    error!(error = %e, "server stopped with an error");
  }

  let closed = store.close().await.context("failed to close store");
  info!("store closed");
  served.and(closed)
}

async fn serve(cfg: &ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  let app = app(cfg, store)?;
  let address = cfg.address();

  info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")
}

/// Resolves on the first of Ctrl+C or SIGTERM.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      error!(error = %e, "failed to install Ctrl+C handler");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        error!(error = %e, "failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => info!("received Ctrl+C, shutting down"),
    _ = terminate => info!("received SIGTERM, shutting down"),
  }
}
