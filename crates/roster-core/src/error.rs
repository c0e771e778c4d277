//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown field: {0:?}")]
  UnknownField(String),

  #[error("invalid age {0:?}: expected a non-negative integer")]
  InvalidAge(String),

  #[error("invalid page window: start {start} must be below end {end}")]
  InvalidPage { start: u32, end: u32 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
