//! Course Catalog Module
//!
//! Owns the course record type and everything that gets records into the
//! system.
//!
//! ## Submodules
//! - **`types`**: The `Course` record and its autocomplete input.
//! - **`store`**: The `CatalogStore` seam (count / fetch all / save all) and an
//!   in-memory implementation.
//! - **`bootstrap`**: One-shot startup operations: ensure the search index
//!   exists and seed an empty catalog from the bundled payload.

pub mod bootstrap;
pub mod store;
pub mod types;
