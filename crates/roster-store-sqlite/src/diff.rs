//! Patch diff: stored row + incoming patch → the columns that must change.

use roster_core::person::{Field, FieldValue, Person, PersonPatch};
use strum::IntoEnumIterator as _;

/// The changed columns of one update, in [`Field`] declaration order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Changes(Vec<(Field, FieldValue)>);

impl Changes {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldValue)> { self.0.iter() }
}

/// Compute the minimal set of column changes that moves `current` towards
/// `patch`.
///
/// A patch value counts only when it is set (non-empty / non-zero) and,
/// after normalization to the field's canonical casing, differs from the
/// stored value. The stored row is already canonical and is compared as is.
pub fn diff(current: &Person, patch: &PersonPatch) -> Changes {
  Changes(
    Field::iter()
      .filter_map(|field| {
        let incoming = patch.normalized_value(field);
        (!incoming.is_unset() && incoming != current.value(field)).then_some((field, incoming))
      })
      .collect(),
  )
}
