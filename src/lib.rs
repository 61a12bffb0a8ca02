//! Course Catalog Search Library
//!
//! This library crate defines the modules behind the course search service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`catalog`**: The course record, the catalog store seam, and the
//!   one-shot startup bootstrap (index creation and seeding).
//! - **`search`**: The query-resolution core. Routes each request either to an
//!   exact in-memory filter pipeline or to a fuzzy query on the external index,
//!   plus prefix autocomplete and the HTTP handlers.
//! - **`elastic`**: Elasticsearch REST adapter implementing both the search
//!   engine and catalog store seams.
//! - **`config`**: Command-line / environment configuration.
//! - **`error`**: The crate-wide error type and its HTTP mapping.

pub mod catalog;
pub mod config;
pub mod elastic;
pub mod error;
pub mod search;
