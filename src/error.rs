//! Error Types
//!
//! Every fallible operation in the library returns [`CatalogError`]. The binary
//! wraps it in `anyhow` at the top level; the HTTP layer maps it to a status code
//! through the `IntoResponse` implementation below.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The bootstrap payload file does not exist.
    #[error("seed payload not found at {}", .0.display())]
    SeedMissing(PathBuf),

    /// The bootstrap payload exists but is not a JSON array of courses.
    #[error("invalid seed payload: {0}")]
    SeedFormat(#[source] serde_json::Error),

    /// Transport-level failure talking to the search engine (connect, timeout, TLS).
    #[error("search engine unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The search engine answered with a non-success status.
    #[error("search engine returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The search engine answered with a body we could not decode.
    #[error("failed to decode search engine response: {0}")]
    UpstreamDecode(#[source] serde_json::Error),

    /// Some documents of a bulk save were rejected by the engine.
    #[error("search engine rejected {failed} of {total} documents")]
    BulkRejected { failed: usize, total: usize },

    /// A request body could not be serialised.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// A query parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            CatalogError::UpstreamUnavailable(_)
            | CatalogError::UpstreamStatus { .. }
            | CatalogError::UpstreamDecode(_)
            | CatalogError::BulkRejected { .. } => StatusCode::BAD_GATEWAY,
            CatalogError::SeedMissing(_)
            | CatalogError::SeedFormat(_)
            | CatalogError::Encode(_)
            | CatalogError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
