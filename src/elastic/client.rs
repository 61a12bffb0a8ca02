use super::protocol::*;
use crate::catalog::store::CatalogStore;
use crate::catalog::types::Course;
use crate::error::{CatalogError, Result};
use crate::search::engine::{SearchEngine, SearchHits, SuggestResponse};
use crate::search::fuzzy::normalize_hits;
use crate::search::query::{CourseQuery, SuggestQuery};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Elasticsearch REST client bound to one index.
///
/// Serves as both the [`SearchEngine`] for the fuzzy and autocomplete paths and
/// the [`CatalogStore`] the exact path reads from, so the two paths always see
/// the same records. Every request carries `timeout`; nothing is retried.
pub struct ElasticClient {
    http_client: reqwest::Client,
    base_url: String,
    index: String,
    timeout: Duration,
    fetch_limit: usize,
}

impl ElasticClient {
    pub fn new(base_url: &str, index: &str, timeout: Duration, fetch_limit: usize) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
            timeout,
            fetch_limit,
        }
    }

    fn index_url(&self, endpoint: &str) -> String {
        format!("{}/{}{}", self.base_url, self.index, endpoint)
    }

    /// Sends `request` and fails on any non-success status.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(CatalogError::UpstreamDecode)
    }

    async fn post_search(&self, body: serde_json::Value) -> Result<SearchResponseBody> {
        let request = self
            .http_client
            .post(self.index_url(ENDPOINT_SEARCH))
            .json(&body);
        self.send_json(request).await
    }
}

#[async_trait]
impl SearchEngine for ElasticClient {
    async fn index_exists(&self) -> Result<bool> {
        let response = self
            .http_client
            .head(self.index_url(""))
            .timeout(self.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(CatalogError::UpstreamStatus {
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }

    async fn create_index(&self) -> Result<()> {
        let request = self
            .http_client
            .put(self.index_url(""))
            .json(&course_mapping());
        self.send(request).await?;
        Ok(())
    }

    async fn search(&self, query: &CourseQuery) -> Result<SearchHits> {
        let body = self.post_search(encode_search(query)).await?;
        Ok(body.into())
    }

    async fn suggest(&self, query: &SuggestQuery) -> Result<SuggestResponse> {
        let body = self.post_search(encode_suggest(query)).await?;
        Ok(body.into())
    }
}

#[async_trait]
impl CatalogStore for ElasticClient {
    async fn count(&self) -> Result<usize> {
        let request = self.http_client.get(self.index_url(ENDPOINT_COUNT));
        match self.send_json::<CountResponseBody>(request).await {
            Ok(body) => Ok(usize::try_from(body.count).unwrap_or(usize::MAX)),
            Err(CatalogError::UpstreamStatus { status: 404, .. }) => Ok(0),
            Err(e) => Err(e),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Course>> {
        let hits = self.search(&CourseQuery::all(self.fetch_limit)).await?;
        let result = normalize_hits(hits);
        if result.total > result.courses.len() {
            tracing::warn!(
                "Catalog holds {} courses but only {} were fetched (fetch limit {})",
                result.total,
                result.courses.len(),
                self.fetch_limit
            );
        }
        Ok(result.courses)
    }

    async fn save_all(&self, courses: Vec<Course>) -> Result<()> {
        if courses.is_empty() {
            return Ok(());
        }

        let total = courses.len();
        let body = encode_bulk(&self.index, &courses).map_err(CatalogError::Encode)?;
        let request = self
            .http_client
            .post(format!("{}{}", self.base_url, ENDPOINT_BULK))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body);
        let response: BulkResponseBody = self.send_json(request).await?;

        if response.errors {
            let failed = response.failed_items();
            tracing::error!("Bulk save rejected {} of {} courses", failed, total);
            return Err(CatalogError::BulkRejected { failed, total });
        }

        tracing::debug!("Bulk saved {} courses into index {}", total, self.index);
        Ok(())
    }
}
