//! Core types and trait definitions for the Roster person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::PersonStore`], enrichment backends
//! implement [`enrich::Enricher`], and [`service::PersonService`] sequences
//! the two.

pub mod enrich;
pub mod error;
pub mod normalize;
pub mod person;
pub mod query;
pub mod service;
pub mod store;

pub use error::{Error, Result};
