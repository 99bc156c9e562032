//! Cache Entry Module
//!
//! A single cached value together with the timestamps used for expiry and
//! recency decisions.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached value and its bookkeeping timestamps.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached payload
    pub value: String,
    /// When the value was fetched and stored; expiry is measured from here
    pub inserted_at: Instant,
    /// Last time the entry was stored or read
    pub last_accessed_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: String) -> Self {
        let now = Instant::now();
        Self {
            value,
            inserted_at: now,
            last_accessed_at: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is already
    /// expired. Reads never extend the lifetime; only `inserted_at` counts.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }

    // == Touch ==
    /// Records a read without affecting the expiry deadline.
    pub fn touch(&mut self) {
        self.last_accessed_at = Instant::now();
    }
}
