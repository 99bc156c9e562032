//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::admission::AdmissionGate;
use crate::cache::BoundedTtlCache;
use crate::client::{BackingStore, ReadThroughClient};
use crate::error::{ProxyError, Result};
use crate::models::{GetParams, HealthResponse, StatsResponse, NOT_FOUND_BODY};

/// Application state shared across all handlers.
///
/// The read-through client owns the shared cache; the gate is cloned cheaply
/// into the admission middleware.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ReadThroughClient>,
    pub gate: AdmissionGate,
}

impl AppState {
    pub fn new(client: ReadThroughClient, gate: AdmissionGate) -> Self {
        Self {
            client: Arc::new(client),
            gate,
        }
    }

    /// Builds the cache, client and gate from configuration around `backend`.
    pub fn from_config(
        config: &crate::config::Config,
        backend: Arc<dyn BackingStore>,
    ) -> Result<Self> {
        let cache = Arc::new(BoundedTtlCache::new(config.cache_size, config.cache_expiry)?);
        let client =
            ReadThroughClient::new(cache, backend).with_backend_timeout(config.backend_timeout);
        let gate = AdmissionGate::new(config.max_clients)?;
        Ok(Self::new(client, gate))
    }

    pub fn cache(&self) -> &Arc<BoundedTtlCache> {
        self.client.cache()
    }
}

/// Handler for GET /GET?key=<key>
///
/// Returns the value as plain text. Any fetch failure is answered with
/// `200` and the not-found body; only a missing key is a client error.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Result<(StatusCode, String)> {
    let key = params.key().map_err(ProxyError::BadRequest)?;
    debug!(key, "Got a GET request");

    let body = match state.client.get(key).await {
        Ok(value) => value,
        Err(ProxyError::BackendFetchFailed { .. }) => NOT_FOUND_BODY.to_string(),
        Err(err) => return Err(err),
    };

    Ok((StatusCode::OK, body))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache().stats(),
        state.client.stats(),
        state.gate.max_concurrent(),
        state.gate.in_flight(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
