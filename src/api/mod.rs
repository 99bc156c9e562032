//! API Module
//!
//! HTTP handlers, middleware and routing for the proxy.
//!
//! # Endpoints
//! - `GET /GET?key=<key>` - Read-through lookup
//! - `GET /stats` - Statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
