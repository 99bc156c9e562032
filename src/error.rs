//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Non-positive cache capacity, TTL or client ceiling
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Backing store lookup failed or the key is absent there
    #[error("Failed to fetch key '{key}' from backend: {source}")]
    BackendFetchFailed {
        key: String,
        #[source]
        source: BackendError,
    },

    /// Malformed inbound request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Backend Error Enum ==
/// Failure reported by a backing store accessor.
///
/// The read-through client treats every variant the same way; the split only
/// exists so logs can tell an outage from a plain miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("key does not exist")]
    NotFound,

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend call timed out")]
    Timeout,
}

impl From<redis::RedisError> for BackendError {
    fn from(err: redis::RedisError) -> Self {
        BackendError::Unavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::BackendFetchFailed { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidConfiguration(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
