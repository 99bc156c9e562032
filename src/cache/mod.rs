//! Cache Module
//!
//! Bounded in-memory cache with absolute TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::RecencyOrder;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;
