//! [`SqliteStore`], the SQLite implementation of [`PersonStore`].

use std::path::Path;

use roster_core::{
  person::{NewPerson, Person, PersonId, PersonPatch},
  query::PersonQuery,
  store::PersonStore,
};
use rusqlite::{OptionalExtension as _, params, params_from_iter};
use tracing::debug;

use crate::{
  Error, Result,
  diff::diff,
  encode::{is_constraint_violation, person_from_row},
  query::{self, DELETE_PERSON, INSERT_PERSON},
  schema::SCHEMA,
};

/// What a transaction closure concluded. Business outcomes travel back as
/// values so the closure only fails on genuine database errors; any variant
/// other than `Done` means the transaction was dropped and rolled back.
enum Outcome<T> {
  Done(T),
  Missing,
  Unchanged,
  Rejected(String),
  NotApplied,
}

/// Run a write, turning a constraint failure into [`Outcome::Rejected`].
fn write(
  tx: &rusqlite::Transaction<'_>,
  sql: &str,
  params: impl rusqlite::Params,
) -> rusqlite::Result<std::result::Result<usize, String>> {
  match tx.execute(sql, params) {
    Ok(affected) => Ok(Ok(affected)),
    Err(e) if is_constraint_violation(&e) => Ok(Err(e.to_string())),
    Err(e) => Err(e),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All clones
/// share one connection, so their transactions execute one after another.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by the tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Later calls on any clone fail with a
  /// database error.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewPerson) -> Result<Person> {
    let n = input.normalized();
    debug!(op = "sqlite.create", name = %n.name, surname = %n.surname, "begin transaction");

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = match write(
          &tx,
          INSERT_PERSON,
          params![n.name, n.surname, n.patronymic, n.age, n.gender, n.nationality],
        )? {
          Ok(inserted) => inserted,
          Err(reason) => return Ok(Outcome::Rejected(reason)),
        };
        if inserted == 0 {
          return Ok(Outcome::NotApplied);
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Outcome::Done(Person {
          id,
          name: n.name,
          surname: n.surname,
          patronymic: n.patronymic,
          age: n.age,
          gender: n.gender,
          nationality: n.nationality,
        }))
      })
      .await?;

    match outcome {
      Outcome::Done(person) => {
        debug!(op = "sqlite.create", id = person.id, "transaction committed");
        Ok(person)
      }
      Outcome::Rejected(reason) => Err(Error::Constraint(reason)),
      Outcome::Missing | Outcome::Unchanged | Outcome::NotApplied => {
        Err(Error::NotApplied { op: "insert" })
      }
    }
  }

  async fn select(&self, query: PersonQuery) -> Result<Vec<Person>> {
    let statement = query::select(&query);
    debug!(op = "sqlite.select", sql = %statement.sql, "begin transaction");

    let people = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let people = {
          let mut stmt = tx.prepare(&statement.sql)?;
          stmt
            .query_map(params_from_iter(statement.params.iter()), person_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        Ok(people)
      })
      .await?;

    if people.is_empty() {
      return Err(match query {
        PersonQuery::ById(id) => Error::PersonNotFound(id),
        PersonQuery::Filtered { .. } | PersonQuery::All { .. } => Error::NoMatches,
      });
    }

    debug!(op = "sqlite.select", count = people.len(), "transaction committed");
    Ok(people)
  }

  async fn update_by_id(&self, id: PersonId, patch: PersonPatch) -> Result<()> {
    debug!(op = "sqlite.update_by_id", id, "begin transaction");

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = tx
          .query_row(&query::select_by_id(id).sql, params![id], person_from_row)
          .optional()?;
        let Some(current) = current else {
          return Ok(Outcome::Missing);
        };

        let changes = diff(&current, &patch);
        if changes.is_empty() {
          return Ok(Outcome::Unchanged);
        }

        let statement = query::update(id, &changes);
        let affected = match write(&tx, &statement.sql, params_from_iter(statement.params.iter()))? {
          Ok(affected) => affected,
          Err(reason) => return Ok(Outcome::Rejected(reason)),
        };
        if affected == 0 {
          return Ok(Outcome::NotApplied);
        }

        tx.commit()?;
        Ok(Outcome::Done(changes.len()))
      })
      .await?;

    match outcome {
      Outcome::Done(changed) => {
        debug!(op = "sqlite.update_by_id", id, changed, "transaction committed");
        Ok(())
      }
      Outcome::Missing => Err(Error::PersonNotFound(id)),
      Outcome::Unchanged => Err(Error::NoNewValues(id)),
      Outcome::Rejected(reason) => Err(Error::Constraint(reason)),
      Outcome::NotApplied => Err(Error::NotApplied { op: "update" }),
    }
  }

  async fn delete_by_id(&self, id: PersonId) -> Result<()> {
    debug!(op = "sqlite.delete_by_id", id, "begin transaction");

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let affected = match write(&tx, DELETE_PERSON, params![id])? {
          Ok(affected) => affected,
          Err(reason) => return Ok(Outcome::Rejected(reason)),
        };
        if affected == 0 {
          return Ok(Outcome::Missing);
        }
        tx.commit()?;
        Ok(Outcome::Done(()))
      })
      .await?;

    match outcome {
      Outcome::Done(()) => {
        debug!(op = "sqlite.delete_by_id", id, "transaction committed");
        Ok(())
      }
      Outcome::Missing => Err(Error::PersonNotFound(id)),
      Outcome::Rejected(reason) => Err(Error::Constraint(reason)),
      Outcome::Unchanged | Outcome::NotApplied => Err(Error::NotApplied { op: "delete" }),
    }
  }
}
