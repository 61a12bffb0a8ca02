//! External Search Engine Seam
//!
//! The search index is an external collaborator. The core talks to it only
//! through [`SearchEngine`], in engine-neutral terms: a [`CourseQuery`] in,
//! [`SearchHits`] out; a [`SuggestQuery`] in, [`SuggestResponse`] out.

use super::query::{CourseQuery, SuggestQuery};
use crate::error::Result;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn index_exists(&self) -> Result<bool>;

    /// Creates the index with the course field mapping.
    async fn create_index(&self) -> Result<()>;

    async fn search(&self, query: &CourseQuery) -> Result<SearchHits>;

    async fn suggest(&self, query: &SuggestQuery) -> Result<SuggestResponse>;
}

#[async_trait]
impl<T: SearchEngine + ?Sized> SearchEngine for Arc<T> {
    async fn index_exists(&self) -> Result<bool> {
        (**self).index_exists().await
    }

    async fn create_index(&self) -> Result<()> {
        (**self).create_index().await
    }

    async fn search(&self, query: &CourseQuery) -> Result<SearchHits> {
        (**self).search(query).await
    }

    async fn suggest(&self, query: &SuggestQuery) -> Result<SuggestResponse> {
        (**self).suggest(query).await
    }
}

/// Ranked hits for one query window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Matches across all pages, when the engine reports it.
    pub total: Option<u64>,
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hit {
    pub id: Option<String>,
    /// Raw stored document. `None` when the engine returned no payload.
    pub source: Option<serde_json::Value>,
}

/// Completion groups keyed by suggester name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestResponse {
    pub suggest: HashMap<String, Vec<SuggestionGroup>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionGroup {
    /// Input text the group answers. Only logged.
    pub text: String,
    pub options: Vec<String>,
}
