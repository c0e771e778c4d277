//! The record service: "enrich, then persist" for creation, and the
//! pass-through contracts for read, update and delete.
//!
//! Every failure is re-classified into [`ServiceError`] so that upper layers
//! never see a backend error type directly.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
  enrich::{EnrichError, Enricher},
  person::{NewPerson, Person, PersonId, PersonPatch},
  query::PersonQuery,
  store::{FailureKind, PersonStore, StoreFailure},
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("enrichment sources have no data: {0}")]
  ClientNotFound(#[source] EnrichError),

  #[error("enrichment failed: {0}")]
  ClientInternal(#[source] EnrichError),

  #[error("not found: {0}")]
  StorageNotFound(#[source] BoxError),

  #[error("no new values: {0}")]
  StorageNoNewValues(#[source] BoxError),

  #[error("constraint violated: {0}")]
  StorageConstraintViolated(#[source] BoxError),

  #[error("storage error: {0}")]
  StorageInternal(#[source] BoxError),
}

fn classify_enrich(op: &'static str, err: EnrichError) -> ServiceError {
  if err.is_not_found() {
    warn!(op, lookup = %err.lookup(), error = %err, "enrichment sources have no data");
    ServiceError::ClientNotFound(err)
  } else {
    error!(op, lookup = %err.lookup(), error = %err, "enrichment failed");
    ServiceError::ClientInternal(err)
  }
}

fn classify_store<F: StoreFailure>(op: &'static str, err: F) -> ServiceError {
  let kind = err.kind();
  let err: BoxError = Box::new(err);
  match kind {
    FailureKind::NotFound => {
      warn!(op, error = %err, "no matching rows");
      ServiceError::StorageNotFound(err)
    }
    FailureKind::NoNewValues => {
      warn!(op, error = %err, "patch carries no new values");
      ServiceError::StorageNoNewValues(err)
    }
    FailureKind::ConstraintViolated => {
      warn!(op, error = %err, "write rejected by a constraint");
      ServiceError::StorageConstraintViolated(err)
    }
    FailureKind::Internal => {
      error!(op, error = %err, "storage failure");
      ServiceError::StorageInternal(err)
    }
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Sequences an [`Enricher`] and a [`PersonStore`]. Both handles are owned
/// and injected at construction; the service itself holds no other state.
pub struct PersonService<S, E> {
  store:    S,
  enricher: E,
}

impl<S, E> PersonService<S, E>
where
  S: PersonStore,
  E: Enricher,
{
  pub fn new(store: S, enricher: E) -> Self { Self { store, enricher } }

  pub fn store(&self) -> &S { &self.store }

  /// Enrich `name` and persist the resulting person. Nothing is written when
  /// enrichment fails.
  pub async fn create(
    &self,
    name: &str,
    surname: &str,
    patronymic: &str,
  ) -> Result<Person, ServiceError> {
    const OP: &str = "service.create";
    debug!(op = OP, name, surname, "creating person");

    let enrichment = self
      .enricher
      .enrich(name)
      .await
      .map_err(|e| classify_enrich(OP, e))?;

    debug!(
      op = OP,
      age = enrichment.age,
      gender = %enrichment.gender,
      nationality = %enrichment.nationality,
      "enrichment complete"
    );

    let person = self
      .store
      .create(NewPerson::enriched(name, surname, patronymic, enrichment))
      .await
      .map_err(|e| classify_store(OP, e))?;

    debug!(op = OP, id = person.id, "person created");
    Ok(person)
  }

  pub async fn select(&self, query: PersonQuery) -> Result<Vec<Person>, ServiceError> {
    const OP: &str = "service.select";
    debug!(op = OP, ?query, "selecting people");

    let people = self
      .store
      .select(query)
      .await
      .map_err(|e| classify_store(OP, e))?;

    debug!(op = OP, count = people.len(), "people selected");
    Ok(people)
  }

  pub async fn update_by_id(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> Result<(), ServiceError> {
    const OP: &str = "service.update_by_id";
    debug!(op = OP, id, ?patch, "updating person");

    self
      .store
      .update_by_id(id, patch)
      .await
      .map_err(|e| classify_store(OP, e))?;

    debug!(op = OP, id, "person updated");
    Ok(())
  }

  pub async fn delete_by_id(&self, id: PersonId) -> Result<(), ServiceError> {
    const OP: &str = "service.delete_by_id";
    debug!(op = OP, id, "deleting person");

    self
      .store
      .delete_by_id(id)
      .await
      .map_err(|e| classify_store(OP, e))?;

    debug!(op = OP, id, "person deleted");
    Ok(())
  }
}
