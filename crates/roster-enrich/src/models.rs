//! Response bodies of the inference services.
//!
//! All three report `count = 0` (and a null value) when they have no data
//! for a name.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AgeResponse {
  #[serde(default)]
  pub count: u64,
  pub age:   Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GenderResponse {
  #[serde(default)]
  pub count:  u64,
  pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NationalityResponse {
  #[serde(default)]
  pub count:   u64,
  #[serde(default)]
  pub country: Vec<Country>,
}

#[derive(Debug, Deserialize)]
pub struct Country {
  pub country_id:  String,
  #[serde(default)]
  pub probability: f64,
}

impl NationalityResponse {
  /// The country with the highest probability; the first one wins ties.
  pub fn most_probable(&self) -> Option<&str> {
    let mut best: Option<&Country> = None;
    for c in &self.country {
      if best.is_none_or(|b| c.probability > b.probability) {
        best = Some(c);
      }
    }
    best
      .map(|c| c.country_id.as_str())
      .filter(|id| !id.is_empty())
  }
}
