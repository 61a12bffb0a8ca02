//! Elasticsearch Adapter
//!
//! Connects the engine-neutral search core to an Elasticsearch cluster over
//! its REST API.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths, the index mapping, query encoders and
//!   response DTOs.
//! - **`client`**: `ElasticClient`, which implements both `SearchEngine` and
//!   `CatalogStore` on top of `reqwest`.

pub mod client;
pub mod protocol;

#[cfg(test)]
mod tests;
