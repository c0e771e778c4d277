//! Person records and the partial patches applied to them.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Result, enrich::Enrichment, normalize::Casing};

/// Storage-assigned primary key of a person row.
pub type PersonId = i64;

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The six descriptive columns of a person row. This is the closed set of
/// names accepted as filters and the only source of column identifiers in
/// generated SQL.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
  Name,
  Surname,
  Patronymic,
  Age,
  Gender,
  Nationality,
}

impl Field {
  /// Column name in the `people` table.
  pub fn column(self) -> &'static str { self.into() }

  /// Casing rule for text fields; `None` for `age`.
  pub fn casing(self) -> Option<Casing> {
    match self {
      Self::Name | Self::Surname | Self::Patronymic => Some(Casing::Title),
      Self::Gender => Some(Casing::Lower),
      Self::Nationality => Some(Casing::Upper),
      Self::Age => None,
    }
  }

  /// Normalize a text value for this field. Values of `age` pass through.
  pub fn normalize(self, value: &str) -> String {
    match self.casing() {
      Some(casing) => casing.apply(value),
      None => value.trim().to_owned(),
    }
  }
}

/// A single column value, typed the way it is bound into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Int(u32),
}

impl FieldValue {
  /// `true` for the empty string and zero, which patches use for "unchanged".
  pub fn is_unset(&self) -> bool {
    match self {
      Self::Text(s) => s.is_empty(),
      Self::Int(n) => *n == 0,
    }
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person row. Text fields are always stored in canonical
/// casing; `age`, `gender` and `nationality` are set at creation from the
/// enrichment sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:          PersonId,
  pub name:        String,
  pub surname:     String,
  pub patronymic:  String,
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

impl Person {
  pub fn value(&self, field: Field) -> FieldValue {
    match field {
      Field::Name => FieldValue::Text(self.name.clone()),
      Field::Surname => FieldValue::Text(self.surname.clone()),
      Field::Patronymic => FieldValue::Text(self.patronymic.clone()),
      Field::Age => FieldValue::Int(self.age),
      Field::Gender => FieldValue::Text(self.gender.clone()),
      Field::Nationality => FieldValue::Text(self.nationality.clone()),
    }
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::PersonStore::create`]. `id` is always assigned by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:        String,
  pub surname:     String,
  pub patronymic:  String,
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

impl NewPerson {
  /// Combine the caller-supplied names with an enrichment triple.
  pub fn enriched(
    name: impl Into<String>,
    surname: impl Into<String>,
    patronymic: impl Into<String>,
    enrichment: Enrichment,
  ) -> Self {
    Self {
      name:        name.into(),
      surname:     surname.into(),
      patronymic:  patronymic.into(),
      age:         enrichment.age,
      gender:      enrichment.gender,
      nationality: enrichment.nationality,
    }
  }

  /// A copy with every text field in canonical casing.
  pub fn normalized(&self) -> Self {
    Self {
      name:        Field::Name.normalize(&self.name),
      surname:     Field::Surname.normalize(&self.surname),
      patronymic:  Field::Patronymic.normalize(&self.patronymic),
      age:         self.age,
      gender:      Field::Gender.normalize(&self.gender),
      nationality: Field::Nationality.normalize(&self.nationality),
    }
  }
}

// ─── PersonPatch ─────────────────────────────────────────────────────────────

/// A partial update. Missing and `null` keys deserialize to the empty string
/// or zero, both of which mean "leave this field unchanged"; a field cannot
/// be cleared through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonPatch {
  #[serde(deserialize_with = "null_as_unset")]
  pub name:        String,
  #[serde(deserialize_with = "null_as_unset")]
  pub surname:     String,
  #[serde(deserialize_with = "null_as_unset")]
  pub patronymic:  String,
  #[serde(deserialize_with = "null_as_unset")]
  pub age:         u32,
  #[serde(deserialize_with = "null_as_unset")]
  pub gender:      String,
  #[serde(deserialize_with = "null_as_unset")]
  pub nationality: String,
}

fn null_as_unset<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PersonPatch {
  /// Parse a JSON request body.
  pub fn from_slice(body: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(body)?) }

  /// The patch value for `field`, normalized to canonical casing.
  pub fn normalized_value(&self, field: Field) -> FieldValue {
    match field {
      Field::Name => FieldValue::Text(field.normalize(&self.name)),
      Field::Surname => FieldValue::Text(field.normalize(&self.surname)),
      Field::Patronymic => FieldValue::Text(field.normalize(&self.patronymic)),
      Field::Age => FieldValue::Int(self.age),
      Field::Gender => FieldValue::Text(field.normalize(&self.gender)),
      Field::Nationality => FieldValue::Text(field.normalize(&self.nationality)),
    }
  }
}
