//! Statement builder for the dynamic read and update paths.
//!
//! Column names come only from [`Field::column`]; every value, including
//! ids and the pagination window, is bound as a positional parameter.

use roster_core::{
  person::{Field, PersonId},
  query::{Page, PersonQuery},
};
use rusqlite::types::Value;

use crate::{
  diff::Changes,
  encode::{PERSON_COLUMNS, sql_value},
};

pub const INSERT_PERSON: &str = "INSERT INTO people (name, surname, patronymic, age, gender, nationality)
   VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub const DELETE_PERSON: &str = "DELETE FROM people WHERE id = ?1";

/// SQL text plus its positional parameters.
#[derive(Debug, PartialEq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<Value>,
}

pub fn select_by_id(id: PersonId) -> Statement {
  Statement {
    sql:    format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
    params: vec![Value::Integer(id)],
  }
}

fn window(page: Page) -> [Value; 2] {
  [Value::Integer(i64::from(page.limit)), Value::Integer(i64::from(page.offset))]
}

pub fn select(query: &PersonQuery) -> Statement {
  match query {
    PersonQuery::ById(id) => select_by_id(*id),
    PersonQuery::Filtered { filter, page } => {
      let column = filter.field().column();
      let mut params = vec![sql_value(filter.value())];
      params.extend(window(*page));
      Statement {
        sql: format!(
          "SELECT {PERSON_COLUMNS} FROM people WHERE {column} = ?1 ORDER BY id LIMIT ?2 OFFSET ?3"
        ),
        params,
      }
    }
    PersonQuery::All { page } => Statement {
      sql:    format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id LIMIT ?1 OFFSET ?2"),
      params: window(*page).into(),
    },
  }
}

/// `UPDATE people SET <changed columns> WHERE id = ?N`. Callers must not
/// pass an empty change set.
pub fn update(id: PersonId, changes: &Changes) -> Statement {
  let mut assignments = Vec::with_capacity(changes.len());
  let mut params = Vec::with_capacity(changes.len() + 1);
  for (i, (field, value)) in changes.iter().enumerate() {
    assignments.push(format!("{} = ?{}", Field::column(*field), i + 1));
    params.push(sql_value(value));
  }
  params.push(Value::Integer(id));

  Statement {
    sql: format!(
      "UPDATE people SET {} WHERE id = ?{}",
      assignments.join(", "),
      params.len()
    ),
    params,
  }
}
