//! Casing rules applied to text fields before they are written or compared.
//!
//! Stored rows are always in canonical form, so comparing a normalized
//! incoming value against the stored one is a plain string equality.

/// The canonical casing of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
  /// First character upper-cased, the rest lower-cased (`"iVAN"` → `"Ivan"`).
  Title,
  Lower,
  Upper,
}

impl Casing {
  /// Trim surrounding whitespace and apply the casing rule.
  pub fn apply(self, value: &str) -> String {
    let value = value.trim();
    match self {
      Self::Title => title_case(value),
      Self::Lower => value.to_lowercase(),
      Self::Upper => value.to_uppercase(),
    }
  }
}

fn title_case(value: &str) -> String {
  let mut chars = value.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_case_lowers_the_tail() {
    assert_eq!(Casing::Title.apply("iVAN"), "Ivan");
    assert_eq!(Casing::Title.apply("john"), "John");
    assert_eq!(Casing::Title.apply("ivan-petrov"), "Ivan-petrov");
  }

  #[test]
  fn title_case_handles_cyrillic() {
    assert_eq!(Casing::Title.apply("иВАН"), "Иван");
  }

  #[test]
  fn empty_and_blank_values_stay_empty() {
    assert_eq!(Casing::Title.apply(""), "");
    assert_eq!(Casing::Upper.apply("   "), "");
  }

  #[test]
  fn lower_and_upper_trim_whitespace() {
    assert_eq!(Casing::Lower.apply(" MALE "), "male");
    assert_eq!(Casing::Upper.apply("ru"), "RU");
  }
}
