//! Redis Proxy - A read-through caching proxy
//!
//! Serves point lookups from a bounded, TTL-expiring local cache and falls
//! back to a Redis backend on a miss, with a ceiling on concurrent requests.

pub mod admission;
pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use admission::AdmissionGate;
pub use api::AppState;
pub use cache::BoundedTtlCache;
pub use client::{BackingStore, MemoryBackend, ReadThroughClient, RedisBackend};
pub use config::Config;
pub use error::{BackendError, ProxyError};
pub use tasks::spawn_cleanup_task;
