//! The `Enricher` trait and its classified failure type.
//!
//! Implemented by `roster-enrich`, which fans out to the external
//! age/gender/nationality sources.

use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Attributes inferred from a first name. Produced once per create request
/// and consumed by it; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

/// Which external source a lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Lookup {
  Age,
  Gender,
  Nationality,
}

/// A failed lookup, already classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichError {
  /// The source answered but holds no data for the name.
  #[error("{lookup} source has no data for {name:?}")]
  NotFound { lookup: Lookup, name: String },

  /// Transport failure, timeout, unexpected status, or unreadable body.
  #[error("{lookup} lookup failed: {reason}")]
  Internal { lookup: Lookup, reason: String },
}

impl EnrichError {
  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }

  pub fn lookup(&self) -> Lookup {
    match self {
      Self::NotFound { lookup, .. } | Self::Internal { lookup, .. } => *lookup,
    }
  }
}

/// Derives an [`Enrichment`] for a first name.
///
/// Implementations either return the full triple or a single classified
/// error; a partial result is never surfaced.
pub trait Enricher: Send + Sync {
  fn enrich(&self, name: &str) -> impl Future<Output = Result<Enrichment, EnrichError>> + Send;
}
