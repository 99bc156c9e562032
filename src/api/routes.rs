//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, stats_handler, AppState};
use super::middleware::limit_concurrency;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /GET?key=<key>` - Read-through lookup, behind the admission gate
/// - `GET /stats` - Cache, backend and gate statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let lookup = get(get_handler).route_layer(middleware::from_fn_with_state(
        state.gate.clone(),
        limit_concurrency,
    ));

    Router::new()
        .route("/GET", lookup)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
