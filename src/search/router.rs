//! Search Router
//!
//! Picks one of two execution strategies per request and returns the same
//! [`SearchResult`] shape from either:
//!
//! - **ExactFilter**: no keyword. Every course is read from the catalog store
//!   and run through `filter::filter_courses`. Deterministic, exact totals.
//! - **FuzzyRemote**: a non-blank keyword. The query is pushed down to the
//!   search engine with typo tolerance on the title.

use super::engine::SearchEngine;
use super::filter::filter_courses;
use super::fuzzy::fuzzy_search;
use super::suggest::suggest;
use super::types::{SearchParams, SearchResult};
use crate::catalog::store::CatalogStore;
use crate::error::Result;

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    ExactFilter,
    FuzzyRemote,
}

impl SearchStrategy {
    pub fn select(params: &SearchParams) -> Self {
        if params.keyword().is_some() {
            SearchStrategy::FuzzyRemote
        } else {
            SearchStrategy::ExactFilter
        }
    }
}

/// Request-scoped entry point shared by the HTTP handlers. Holds no mutable state.
pub struct SearchRouter {
    store: Arc<dyn CatalogStore>,
    engine: Arc<dyn SearchEngine>,
}

impl SearchRouter {
    pub fn new(store: Arc<dyn CatalogStore>, engine: Arc<dyn SearchEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn route(&self, params: &SearchParams) -> Result<SearchResult> {
        let strategy = SearchStrategy::select(params);
        tracing::debug!("Routing search via {:?}: {:?}", strategy, params);

        let result = match strategy {
            SearchStrategy::ExactFilter => {
                let courses = self.store.fetch_all().await?;
                filter_courses(&courses, params)
            }
            SearchStrategy::FuzzyRemote => fuzzy_search(self.engine.as_ref(), params).await?,
        };

        tracing::debug!(
            "Search returned {} of {} courses",
            result.courses.len(),
            result.total
        );
        Ok(result)
    }

    pub async fn suggest(&self, prefix: &str) -> Result<Vec<String>> {
        suggest(self.engine.as_ref(), prefix).await
    }
}
