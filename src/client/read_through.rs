//! Read-Through Client
//!
//! Cache-aside lookups: answer from the bounded cache when possible, fall
//! back to the backing store on a miss and remember what it returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::BoundedTtlCache;
use crate::client::BackingStore;
use crate::error::{BackendError, ProxyError, Result};

// == Client Stats ==
#[derive(Debug, Default)]
struct ClientCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    backend_errors: AtomicU64,
}

/// Lookup counters observed by the read-through client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the backing store
    pub misses: u64,
    /// Misses the backing store could not answer
    pub backend_errors: u64,
}

impl ClientStats {
    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Lookup ==
/// What the cache said about a key before any backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CacheLookup {
    Hit(String),
    Miss,
    /// `contains` saw the key but `get` did not: it expired or was evicted
    /// in between.
    Inconsistent,
}

// == Read-Through Client ==
/// Composes the bounded cache with a backing store.
///
/// The cache lock is never held while the backend call is outstanding;
/// concurrent misses on the same key may both fetch, and the last insert
/// wins.
pub struct ReadThroughClient {
    cache: Arc<BoundedTtlCache>,
    backend: Arc<dyn BackingStore>,
    backend_timeout: Option<Duration>,
    counters: ClientCounters,
}

impl ReadThroughClient {
    pub fn new(cache: Arc<BoundedTtlCache>, backend: Arc<dyn BackingStore>) -> Self {
        Self {
            cache,
            backend,
            backend_timeout: None,
            counters: ClientCounters::default(),
        }
    }

    /// Bounds every backend call; an elapsed call counts as a failed fetch.
    pub fn with_backend_timeout(mut self, timeout: Duration) -> Self {
        self.backend_timeout = Some(timeout);
        self
    }

    pub fn cache(&self) -> &Arc<BoundedTtlCache> {
        &self.cache
    }

    // == Get ==
    /// Returns the value for `key`, from the cache or the backing store.
    ///
    /// # Errors
    /// `BackendFetchFailed` when the key missed the cache and the backend
    /// reported it absent, failed, or timed out. The cache is left untouched
    /// on that path.
    pub async fn get(&self, key: &str) -> Result<String> {
        let lookup = self.lookup(key);
        self.resolve(key, lookup).await
    }

    fn lookup(&self, key: &str) -> CacheLookup {
        if !self.cache.contains(key) {
            return CacheLookup::Miss;
        }
        match self.cache.get(key) {
            Some(value) => CacheLookup::Hit(value),
            None => CacheLookup::Inconsistent,
        }
    }

    /// Answers a hit directly; anything else goes to the backend.
    async fn resolve(&self, key: &str, lookup: CacheLookup) -> Result<String> {
        match lookup {
            CacheLookup::Hit(value) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "Served from local cache");
                return Ok(value);
            }
            CacheLookup::Inconsistent => {
                warn!(key, "Cache reported key present but lookup missed, refetching")
            }
            CacheLookup::Miss => {}
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key, "Cache miss, fetching from backend");

        let value = match self.fetch(key).await {
            Ok(value) => value,
            Err(source) => {
                self.counters.backend_errors.fetch_add(1, Ordering::Relaxed);
                warn!(key, error = %source, "Failed to fetch key from backend");
                return Err(ProxyError::BackendFetchFailed {
                    key: key.to_string(),
                    source,
                });
            }
        };

        if self.cache.add(key.to_string(), value.clone()) {
            info!(key, "Cache full, evicted least recently used entry");
        }
        debug!(key, "Fetched key from backend");
        Ok(value)
    }

    async fn fetch(&self, key: &str) -> std::result::Result<String, BackendError> {
        match self.backend_timeout {
            Some(limit) => tokio::time::timeout(limit, self.backend.get(key))
                .await
                .map_err(|_| BackendError::Timeout)?,
            None => self.backend.get(key).await,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> ClientStats {
        ClientStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            backend_errors: self.counters.backend_errors.load(Ordering::Relaxed),
        }
    }
}
