//! Error type for `roster-store-sqlite`.

use roster_core::{
  person::PersonId,
  store::{FailureKind, StoreFailure},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("person {0} not found")]
  PersonNotFound(PersonId),

  #[error("no person matches the query")]
  NoMatches,

  #[error("patch for person {0} carries no new values")]
  NoNewValues(PersonId),

  #[error("constraint violated: {0}")]
  Constraint(String),

  /// The statement ran but touched no row, e.g. the row vanished between
  /// the read and the write of an update.
  #[error("{op} did not affect any row")]
  NotApplied { op: &'static str },
}

impl StoreFailure for Error {
  fn kind(&self) -> FailureKind {
    match self {
      Error::PersonNotFound(_) | Error::NoMatches => FailureKind::NotFound,
      Error::NoNewValues(_) => FailureKind::NoNewValues,
      Error::Constraint(_) => FailureKind::ConstraintViolated,
      Error::Database(_) | Error::NotApplied { .. } => FailureKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
