//! Concurrent fan-out over the three lookups.
//!
//! All three lookups always run to completion; a failing one does not cancel
//! its siblings. Only after the join does the orchestrator decide the
//! outcome: the full triple, or exactly one failure promoted by precedence.

use roster_core::enrich::{EnrichError, Enricher, Enrichment};
use tracing::debug;

use crate::sources::NameSources;

/// Implements [`Enricher`] by joining the three [`NameSources`] lookups.
pub struct Orchestrator<S> {
  sources: S,
}

impl<S: NameSources> Orchestrator<S> {
  pub fn new(sources: S) -> Self { Self { sources } }
}

/// Pick the failure to report. Scans in collection order and returns the
/// first `NotFound` if there is one, otherwise the first failure.
fn promote<'a>(failures: impl IntoIterator<Item = &'a EnrichError>) -> Option<&'a EnrichError> {
  let mut first = None;
  for failure in failures {
    if failure.is_not_found() {
      return Some(failure);
    }
    first.get_or_insert(failure);
  }
  first
}

impl<S: NameSources> Enricher for Orchestrator<S> {
  async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError> {
    debug!(op = "orchestrator.enrich", name, "starting lookups");

    let (age, gender, nationality) = tokio::join!(
      self.sources.age(name),
      self.sources.gender(name),
      self.sources.nationality(name),
    );

    let failures = [age.as_ref().err(), gender.as_ref().err(), nationality.as_ref().err()];
    for failure in failures.iter().flatten() {
      debug!(op = "orchestrator.enrich", name, error = %failure, "lookup failed");
    }
    if let Some(failure) = promote(failures.into_iter().flatten()) {
      return Err(failure.clone());
    }

    Ok(Enrichment { age: age?, gender: gender?, nationality: nationality? })
  }
}

#[cfg(test)]
mod tests {
  use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
  };

  use roster_core::enrich::Lookup;

  use super::*;

  /// A canned answer per lookup, each delivered after its own delay.
  struct Scripted {
    age:         (u64, Result<u32, EnrichError>),
    gender:      (u64, Result<String, EnrichError>),
    nationality: (u64, Result<String, EnrichError>),
    finished:    AtomicUsize,
  }

  impl Scripted {
    fn ok() -> Self {
      Self {
        age:         (0, Ok(42)),
        gender:      (0, Ok("male".into())),
        nationality: (0, Ok("UA".into())),
        finished:    AtomicUsize::new(0),
      }
    }

    async fn deliver<T: Clone>(&self, (delay_ms, result): &(u64, Result<T, EnrichError>)) -> Result<T, EnrichError> {
      tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
      self.finished.fetch_add(1, Ordering::SeqCst);
      result.clone()
    }
  }

  impl NameSources for Scripted {
    async fn age(&self, _name: &str) -> Result<u32, EnrichError> { self.deliver(&self.age).await }

    async fn gender(&self, _name: &str) -> Result<String, EnrichError> {
      self.deliver(&self.gender).await
    }

    async fn nationality(&self, _name: &str) -> Result<String, EnrichError> {
      self.deliver(&self.nationality).await
    }
  }

  fn not_found(lookup: Lookup) -> EnrichError {
    EnrichError::NotFound { lookup, name: "ivan".into() }
  }

  fn internal(lookup: Lookup) -> EnrichError {
    EnrichError::Internal { lookup, reason: "connection reset".into() }
  }

  #[tokio::test]
  async fn success_returns_the_observed_triple() {
    let o = Orchestrator::new(Scripted::ok());
    let e = o.enrich("ivan").await.unwrap();
    assert_eq!(e, Enrichment { age: 42, gender: "male".into(), nationality: "UA".into() });
  }

  #[tokio::test]
  async fn completion_order_does_not_matter() {
    let mut s = Scripted::ok();
    s.age.0 = 60;
    s.gender.0 = 30;
    s.nationality.0 = 0;

    let e = Orchestrator::new(s).enrich("ivan").await.unwrap();
    assert_eq!(e.age, 42);
    assert_eq!(e.gender, "male");
    assert_eq!(e.nationality, "UA");
  }

  #[tokio::test(start_paused = true)]
  async fn lookups_run_concurrently() {
    let mut s = Scripted::ok();
    s.age.0 = 100;
    s.gender.0 = 100;
    s.nationality.0 = 100;

    let started = tokio::time::Instant::now();
    Orchestrator::new(s).enrich("ivan").await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(200));
  }

  #[tokio::test]
  async fn all_not_found_is_not_found() {
    let mut s = Scripted::ok();
    s.age.1 = Err(not_found(Lookup::Age));
    s.gender.1 = Err(not_found(Lookup::Gender));
    s.nationality.1 = Err(not_found(Lookup::Nationality));

    let err = Orchestrator::new(s).enrich("ivan").await.unwrap_err();
    assert_eq!(err, not_found(Lookup::Age));
  }

  #[tokio::test]
  async fn not_found_beats_internal() {
    let mut s = Scripted::ok();
    s.age.1 = Err(internal(Lookup::Age));
    s.nationality.1 = Err(not_found(Lookup::Nationality));

    let err = Orchestrator::new(s).enrich("ivan").await.unwrap_err();
    assert_eq!(err, not_found(Lookup::Nationality));
  }

  #[tokio::test]
  async fn only_internal_failures_report_the_first() {
    let mut s = Scripted::ok();
    s.gender.1 = Err(internal(Lookup::Gender));
    s.nationality.1 = Err(internal(Lookup::Nationality));

    let err = Orchestrator::new(s).enrich("ivan").await.unwrap_err();
    assert_eq!(err, internal(Lookup::Gender));
  }

  #[tokio::test]
  async fn early_failure_does_not_cancel_siblings() {
    let mut s = Scripted::ok();
    s.age.1 = Err(internal(Lookup::Age));
    s.gender.0 = 50;
    s.nationality.0 = 80;

    let o = Orchestrator::new(s);
    assert!(o.enrich("ivan").await.is_err());
    assert_eq!(o.sources.finished.load(Ordering::SeqCst), 3);
  }
}
