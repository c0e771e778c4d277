//! The three single-attempt lookups the orchestrator fans out to.

use std::future::Future;

use roster_core::enrich::EnrichError;

/// One lookup per inferred attribute. Each call is a single attempt with no
/// retry; failures come back already classified.
pub trait NameSources: Send + Sync {
  fn age(&self, name: &str) -> impl Future<Output = Result<u32, EnrichError>> + Send;

  fn gender(&self, name: &str) -> impl Future<Output = Result<String, EnrichError>> + Send;

  fn nationality(&self, name: &str) -> impl Future<Output = Result<String, EnrichError>> + Send;
}
