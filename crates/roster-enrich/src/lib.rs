//! Name-based enrichment for Roster.
//!
//! [`HttpSources`] queries the three public inference services (age, gender,
//! nationality) over one shared [`reqwest::Client`]. [`Orchestrator`] runs the
//! three lookups concurrently and implements [`roster_core::enrich::Enricher`].

mod models;

pub mod client;
pub mod orchestrator;
pub mod sources;

pub use client::{HttpSources, SourcesConfig};
pub use orchestrator::Orchestrator;
pub use sources::NameSources;
