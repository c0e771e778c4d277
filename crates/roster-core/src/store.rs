//! The `PersonStore` trait and failure classification.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! [`crate::service::PersonService`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  person::{NewPerson, Person, PersonId, PersonPatch},
  query::PersonQuery,
};

// ─── Failure classification ──────────────────────────────────────────────────

/// The storage conditions the service distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// No row matched the id or the filter.
  NotFound,
  /// A patch carried nothing that differs from the stored row.
  NoNewValues,
  /// The database rejected a write on a CHECK or NOT NULL constraint.
  ConstraintViolated,
  /// Anything else, including a write that affected zero rows.
  Internal,
}

/// Implemented by backend error types so callers can classify a failure
/// without naming the backend.
pub trait StoreFailure: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> FailureKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// Every method runs inside a single transaction that commits only when the
/// whole operation succeeds.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: StoreFailure;

  /// Normalize and persist a new person, returning the stored row with its
  /// assigned id.
  fn create(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Read rows. Zero matches is a [`FailureKind::NotFound`] error rather than
  /// an empty vector.
  fn select(
    &self,
    query: PersonQuery,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Apply the fields of `patch` that differ from the stored row.
  ///
  /// Fails with [`FailureKind::NotFound`] if the row does not exist and with
  /// [`FailureKind::NoNewValues`] if nothing would change.
  fn update_by_id(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete a row. Fails with [`FailureKind::NotFound`] if it does not exist.
  fn delete_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
