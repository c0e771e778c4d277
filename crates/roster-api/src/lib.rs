//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`] over any
//! [`PersonStore`] and [`Enricher`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.

pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use roster_core::{enrich::Enricher, service::PersonService, store::PersonStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, E> {
  pub service:      Arc<PersonService<S, E>>,
  /// Default `end` of the select window when the request gives none.
  pub select_limit: u32,
}

impl<S, E> Clone for AppState<S, E> {
  fn clone(&self) -> Self {
    Self { service: Arc::clone(&self.service), select_limit: self.select_limit }
  }
}

impl<S, E> AppState<S, E> {
  pub fn new(service: PersonService<S, E>, select_limit: u32) -> Self {
    Self { service: Arc::new(service), select_limit }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, E>(state: AppState<S, E>) -> Router<()>
where
  S: PersonStore + 'static,
  E: Enricher + 'static,
{
  Router::new()
    .route("/create", post(people::create::<S, E>))
    .route("/select", get(people::select::<S, E>))
    .route("/select/{id}", get(people::select_one::<S, E>))
    .route("/update/{id}", put(people::update::<S, E>))
    .route("/delete/{id}", delete(people::delete::<S, E>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
