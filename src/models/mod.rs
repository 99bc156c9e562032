//! Request and Response models for the proxy API
//!
//! This module defines the DTOs used for parsing inbound requests and
//! serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::GetParams;
pub use responses::{HealthResponse, StatsResponse, NOT_FOUND_BODY};
