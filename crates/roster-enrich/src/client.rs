//! HTTP implementation of [`NameSources`] over the public inference APIs.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use roster_core::enrich::{EnrichError, Lookup};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
  models::{AgeResponse, GenderResponse, NationalityResponse},
  sources::NameSources,
};

/// Endpoints and timeout for the three sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
  pub age_url:         String,
  pub gender_url:      String,
  pub nationality_url: String,
  /// Applies to every request, connect through body.
  pub timeout_secs:    u64,
}

impl Default for SourcesConfig {
  fn default() -> Self {
    Self {
      age_url:         "https://api.agify.io".to_owned(),
      gender_url:      "https://api.genderize.io".to_owned(),
      nationality_url: "https://api.nationalize.io".to_owned(),
      timeout_secs:    5,
    }
  }
}

/// Queries agify / genderize / nationalize style services.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based and its
/// connection pool is shared by all three lookups.
#[derive(Clone)]
pub struct HttpSources {
  client: Client,
  config: SourcesConfig,
}

impl HttpSources {
  pub fn new(config: SourcesConfig) -> Result<Self, reqwest::Error> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  /// `GET <base_url>/?name=<name>` and decode the body.
  ///
  /// 404 is "not found"; any other non-2xx status, a transport error, a
  /// timeout, or an undecodable body is "internal".
  async fn fetch<T: DeserializeOwned>(
    &self,
    lookup: Lookup,
    base_url: &str,
    name: &str,
  ) -> Result<T, EnrichError> {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    debug!(op = "client.fetch", %lookup, name, %url, "querying source");

    let resp = self
      .client
      .get(&url)
      .query(&[("name", name)])
      .send()
      .await
      .map_err(|e| {
        let reason = if e.is_timeout() {
          format!("timed out: {e}")
        } else {
          format!("request failed: {e}")
        };
        EnrichError::Internal { lookup, reason }
      })?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
      return Err(not_found(lookup, name));
    }
    if !status.is_success() {
      return Err(EnrichError::Internal { lookup, reason: format!("unexpected status {status}") });
    }

    let body = resp.json::<T>().await.map_err(|e| EnrichError::Internal {
      lookup,
      reason: format!("malformed response: {e}"),
    })?;

    debug!(op = "client.fetch", %lookup, name, "source answered");
    Ok(body)
  }
}

fn not_found(lookup: Lookup, name: &str) -> EnrichError {
  EnrichError::NotFound { lookup, name: name.to_owned() }
}

impl NameSources for HttpSources {
  async fn age(&self, name: &str) -> Result<u32, EnrichError> {
    let body: AgeResponse = self.fetch(Lookup::Age, &self.config.age_url, name).await?;
    match body.age {
      Some(age) if body.count > 0 => Ok(age),
      _ => Err(not_found(Lookup::Age, name)),
    }
  }

  async fn gender(&self, name: &str) -> Result<String, EnrichError> {
    let body: GenderResponse = self
      .fetch(Lookup::Gender, &self.config.gender_url, name)
      .await?;
    match body.gender {
      Some(gender) if body.count > 0 && !gender.is_empty() => Ok(gender),
      _ => Err(not_found(Lookup::Gender, name)),
    }
  }

  async fn nationality(&self, name: &str) -> Result<String, EnrichError> {
    let body: NationalityResponse = self
      .fetch(Lookup::Nationality, &self.config.nationality_url, name)
      .await?;
    if body.count == 0 {
      return Err(not_found(Lookup::Nationality, name));
    }
    body
      .most_probable()
      .map(str::to_owned)
      .ok_or_else(|| not_found(Lookup::Nationality, name))
  }
}
