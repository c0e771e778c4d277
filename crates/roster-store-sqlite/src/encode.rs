//! Conversions between domain types and SQLite rows and values.

use roster_core::person::{FieldValue, Person};
use rusqlite::types::Value;

/// Column list shared by every `SELECT`, in the order [`person_from_row`]
/// reads it.
pub const PERSON_COLUMNS: &str = "id, name, surname, patronymic, age, gender, nationality";

pub fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:          row.get(0)?,
    name:        row.get(1)?,
    surname:     row.get(2)?,
    patronymic:  row.get(3)?,
    age:         row.get(4)?,
    gender:      row.get(5)?,
    nationality: row.get(6)?,
  })
}

pub fn sql_value(value: &FieldValue) -> Value {
  match value {
    FieldValue::Text(s) => Value::Text(s.clone()),
    FieldValue::Int(n) => Value::Integer(i64::from(*n)),
  }
}

/// `true` when SQLite refused a write because of a CHECK, NOT NULL or
/// UNIQUE constraint.
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}
