//! API Middleware
//!
//! Applies the admission gate around request handling.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::admission::AdmissionGate;

/// Holds an admission slot for the whole downstream handler.
///
/// The permit lives on this future's stack, so it is released when the
/// handler finishes, fails, panics or the connection is dropped mid-request.
pub async fn limit_concurrency(
    State(gate): State<AdmissionGate>,
    request: Request,
    next: Next,
) -> Response {
    let _permit = match gate.admit().await {
        Ok(permit) => permit,
        Err(err) => return err.into_response(),
    };
    next.run(request).await
}
