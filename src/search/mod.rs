//! Search Service Module
//!
//! The query-resolution core: turns a request's parameters into either an
//! exact in-memory pipeline or a fuzzy query against the external index, and
//! normalises both into one `SearchResult`.
//!
//! ## Submodules
//! - **`types`**: Typed parameters, sort keys and the result shape.
//! - **`filter`**: Exact filter / sort / paginate pipeline and the shared
//!   missing-field policy.
//! - **`query`**: Engine-neutral query model (match, term, range, sort, window)
//!   and the completion request.
//! - **`engine`**: The `SearchEngine` trait the external index is reached through.
//! - **`fuzzy`**: Fuzzy query execution and hit normalisation.
//! - **`suggest`**: Prefix autocomplete.
//! - **`router`**: Strategy selection per request.
//! - **`handlers`**: HTTP handlers for the Axum web server.

pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod handlers;
pub mod query;
pub mod router;
pub mod suggest;
pub mod types;
