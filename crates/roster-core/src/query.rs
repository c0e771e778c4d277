//! Read selectors for [`crate::store::PersonStore::select`].

use std::str::FromStr as _;

use crate::{
  Error, Result,
  person::{Field, FieldValue, PersonId},
};

/// Default page size when the caller gives no window.
pub const DEFAULT_LIMIT: u32 = 10;

// ─── Filter ──────────────────────────────────────────────────────────────────

/// An equality predicate on one column. The value is normalized to the
/// field's canonical casing on construction, so `gender = "MALE"` and
/// `gender = "male"` build the same filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
  field: Field,
  value: FieldValue,
}

impl Filter {
  /// Build a filter from a field name and a raw value, as received on the
  /// wire.
  pub fn parse(field: &str, value: &str) -> Result<Self> {
    let field =
      Field::from_str(field.trim()).map_err(|_| Error::UnknownField(field.to_owned()))?;
    Self::new(field, value)
  }

  pub fn new(field: Field, value: &str) -> Result<Self> {
    let value = match field {
      Field::Age => FieldValue::Int(
        value
          .trim()
          .parse()
          .map_err(|_| Error::InvalidAge(value.to_owned()))?,
      ),
      text => FieldValue::Text(text.normalize(value)),
    };
    Ok(Self { field, value })
  }

  pub fn field(&self) -> Field { self.field }

  pub fn value(&self) -> &FieldValue { &self.value }
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// A pagination window over rows ordered by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub offset: u32,
  pub limit:  u32,
}

impl Page {
  /// Build a page from the `start`/`end` pair of a select request: skip
  /// `start` rows, then return at most `end` rows. `start` must be below
  /// `end`.
  pub fn window(start: u32, end: u32) -> Result<Self> {
    if start >= end {
      return Err(Error::InvalidPage { start, end });
    }
    Ok(Self { offset: start, limit: end })
  }
}

impl Default for Page {
  fn default() -> Self { Self { offset: 0, limit: DEFAULT_LIMIT } }
}

// ─── PersonQuery ─────────────────────────────────────────────────────────────

/// What to read. Selecting by id and filtering are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonQuery {
  /// Single-row lookup; no pagination applies.
  ById(PersonId),
  Filtered { filter: Filter, page: Page },
  All { page: Page },
}
