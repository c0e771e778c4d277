//! Wiring for the Roster server binary: configuration, logging and
//! application assembly.

pub mod logging;

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use axum::Router;
use roster_api::{AppState, api_router};
use roster_core::{query::DEFAULT_LIMIT, service::PersonService};
use roster_enrich::{HttpSources, Orchestrator, SourcesConfig};
use roster_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::timeout::TimeoutLayer;

use crate::logging::LogMode;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Default page size of `GET /select`.
  pub select_limit:         u32,
  /// Upper bound on handling one request, from reading it to writing the
  /// response. Slower requests are answered with 408.
  pub request_timeout_secs: u64,
  pub log_mode:             LogMode,
  pub enrichment:           SourcesConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".to_owned(),
      port:                 8080,
      store_path:           PathBuf::from("roster.db"),
      select_limit:         DEFAULT_LIMIT,
      request_timeout_secs: 30,
      log_mode:             LogMode::default(),
      enrichment:           SourcesConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the (optional) TOML file at `path` under the environment.
  /// Nested keys use a double underscore, e.g.
  /// `ROSTER_ENRICHMENT__TIMEOUT_SECS=10`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ROSTER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Build the HTTP sources, the orchestrator and the service around `store`,
/// and return the API router.
pub fn app(config: &ServerConfig, store: SqliteStore) -> anyhow::Result<Router> {
  let sources =
    HttpSources::new(config.enrichment.clone()).context("failed to build HTTP client")?;
  let service = PersonService::new(store, Orchestrator::new(sources));
  let router = api_router(AppState::new(service, config.select_limit));
  Ok(with_request_timeout(router, Duration::from_secs(config.request_timeout_secs)))
}

/// Bound every request handled by `router` to `timeout`.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
  router.layer(TimeoutLayer::new(timeout))
}
