use super::router::SearchRouter;
use super::types::{DEFAULT_PAGE_SIZE, SearchParams, SearchResult, SortKey};
use crate::error::{CatalogError, Result};

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/api/search";
pub const ENDPOINT_SUGGEST: &str = "/api/search/suggest";
pub const ENDPOINT_HEALTH: &str = "/health";

/// Raw query string of `GET /api/search`. Type mismatches are rejected by the
/// `Query` extractor before reaching [`SearchQueryParams::into_params`] and
/// answered through [`invalid_query`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryParams {
    pub q: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl SearchQueryParams {
    pub fn into_params(self) -> Result<SearchParams> {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 {
            return Err(CatalogError::InvalidParameter(
                "size must be at least 1".to_string(),
            ));
        }
        if page.checked_mul(size).is_none() {
            return Err(CatalogError::InvalidParameter(format!(
                "page {} with size {} is out of range",
                page, size
            )));
        }
        for (name, value) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(CatalogError::InvalidParameter(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        Ok(SearchParams {
            keyword: self.q,
            min_age: self.min_age,
            max_age: self.max_age,
            category: self.category,
            course_type: self.course_type,
            min_price: self.min_price,
            max_price: self.max_price,
            start_date: self.start_date,
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            page,
            size,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub prefix: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn routes(search: Arc<SearchRouter>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_SUGGEST, get(handle_suggest))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(search))
}

pub async fn handle_search(
    query: std::result::Result<Query<SearchQueryParams>, QueryRejection>,
    Extension(search): Extension<Arc<SearchRouter>>,
) -> Result<Json<SearchResult>> {
    let Query(raw) = query.map_err(invalid_query)?;
    let params = raw.into_params()?;
    let result = search.route(&params).await?;
    Ok(Json(result))
}

pub async fn handle_suggest(
    query: std::result::Result<Query<SuggestParams>, QueryRejection>,
    Extension(search): Extension<Arc<SearchRouter>>,
) -> Result<Json<Vec<String>>> {
    let Query(params) = query.map_err(invalid_query)?;
    let suggestions = search.suggest(&params.prefix).await?;
    Ok(Json(suggestions))
}

/// Query strings the extractor could not parse become `InvalidParameter`,
/// so they share the JSON error body.
fn invalid_query(rejection: QueryRejection) -> CatalogError {
    CatalogError::InvalidParameter(rejection.body_text())
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
