//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (name <> ''),
    surname     TEXT    NOT NULL CHECK (surname <> ''),
    patronymic  TEXT    NOT NULL DEFAULT '',
    age         INTEGER NOT NULL CHECK (age BETWEEN 0 AND 150),
    gender      TEXT    NOT NULL CHECK (gender IN ('male', 'female')),
    nationality TEXT    NOT NULL CHECK (length(nationality) = 2)
);

CREATE INDEX IF NOT EXISTS people_surname_idx     ON people(surname);
CREATE INDEX IF NOT EXISTS people_nationality_idx ON people(nationality);

PRAGMA user_version = 1;
";
