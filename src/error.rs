//! Error types for the catalog cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog cache.
///
/// The `DataCache` getters never return these to their callers; they are
/// produced by the remote boundary and consumed by the degrade chain.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Remote call failed (connection error, timeout, undecodable body)
    #[error("Remote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("Remote returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Remote call succeeded but the body is not a usable collection
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A namespace refused a write
    #[error("Cache full: {0}")]
    CacheFull(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::Transport(_) => StatusCode::BAD_GATEWAY,
            CatalogError::Status { .. } => StatusCode::BAD_GATEWAY,
            CatalogError::MalformedPayload(_) => StatusCode::BAD_GATEWAY,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::CacheFull(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog cache.
pub type Result<T> = std::result::Result<T, CatalogError>;
