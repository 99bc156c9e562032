//! Bounded TTL Cache Module
//!
//! HashMap storage combined with a recency order and absolute TTL expiry,
//! guarded by a single internal lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyOrder};
use crate::error::{ProxyError, Result};

#[derive(Debug)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    order: RecencyOrder,
    stats: CacheStats,
}

impl Inner {
    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.forget(key);
    }
}

// == Bounded TTL Cache ==
/// Fixed-capacity cache with LRU eviction and absolute TTL expiry.
///
/// Every operation takes `&self` and runs under one internal lock, so the
/// cache can be shared behind an `Arc` between concurrent requests. Values
/// are always returned as owned copies; the lock is never held past the
/// end of a method call.
#[derive(Debug)]
pub struct BoundedTtlCache {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl BoundedTtlCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `capacity` or `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(ProxyError::InvalidConfiguration(
                "cache capacity must be greater than 0".to_string(),
            ));
        }
        if ttl.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "cache ttl must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity),
                order: RecencyOrder::new(),
                stats: CacheStats::new(capacity),
            }),
            capacity,
            ttl,
        })
    }

    // Poisoning is ignored: no method panics between two dependent writes.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Contains ==
    /// Returns true if `key` is stored and not expired.
    ///
    /// Pure observation: neither recency nor storage is modified.
    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    // == Get ==
    /// Returns a copy of the value for `key` if present and unexpired.
    ///
    /// A hit marks the key most recently used. An expired entry found here is
    /// removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.lock();

        let entry = inner.entries.get_mut(key)?;
        if entry.is_expired(self.ttl) {
            inner.remove(key);
            inner.stats.record_expirations(1);
            debug!(key, "Dropped expired cache entry on read");
            return None;
        }

        entry.touch();
        let value = entry.value.clone();
        inner.order.mark_used(key);
        Some(value)
    }

    // == Add ==
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// Inserting a new key into a full cache first evicts the least recently
    /// used entry. Overwriting never evicts. Returns whether an eviction
    /// happened.
    pub fn add(&self, key: String, value: String) -> bool {
        let mut inner = self.lock();
        let mut evicted = false;

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_least_recent() {
                inner.entries.remove(&oldest);
                inner.stats.record_eviction();
                evicted = true;
                debug!(key = %oldest, "Evicted least recently used entry");
            }
        }

        inner.order.mark_used(&key);
        inner.entries.insert(key, CacheEntry::new(value));
        evicted
    }

    // == Purge Expired ==
    /// Removes every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();

        let expired: Vec<String> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            inner.remove(key);
        }
        inner.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }
}
