//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::client::ClientStats;

/// Body returned by the lookup endpoint when no value could be produced,
/// whether the key is absent from the backend or the backend is unreachable.
pub const NOT_FOUND_BODY: &str = "key not found";

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups forwarded to the backend
    pub misses: u64,
    /// Forwarded lookups the backend could not answer
    pub backend_errors: u64,
    /// Entries evicted to make room
    pub evictions: u64,
    /// Entries dropped after their TTL elapsed
    pub expirations: u64,
    /// Entries currently cached
    pub total_entries: usize,
    /// Configured cache capacity
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Concurrent request ceiling
    pub max_clients: usize,
    /// Requests currently holding an admission slot
    pub in_flight: usize,
}

impl StatsResponse {
    pub fn new(
        cache: CacheStats,
        client: ClientStats,
        max_clients: usize,
        in_flight: usize,
    ) -> Self {
        Self {
            hit_rate: client.hit_rate(),
            hits: client.hits,
            misses: client.misses,
            backend_errors: client.backend_errors,
            evictions: cache.evictions,
            expirations: cache.expirations,
            total_entries: cache.total_entries,
            capacity: cache.capacity,
            max_clients,
            in_flight,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
