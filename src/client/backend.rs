//! Backing Store Module
//!
//! The contract the proxy consumes from its authoritative key-value store,
//! plus an in-process implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::BackendError;

// == Backing Store Trait ==
/// Read access to the authoritative store fronted by the proxy.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    /// Fetches the value for `key`.
    ///
    /// Returns `BackendError::NotFound` when the key does not exist and
    /// `Unavailable` or `Timeout` when the store could not answer.
    async fn get(&self, key: &str) -> Result<String, BackendError>;
}

// == Memory Backend ==
/// HashMap-backed store, used for tests and for running without Redis.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
    calls: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding every lowercase ASCII letter mapped to itself.
    pub fn with_lowercase_letters() -> Self {
        let data = ('a'..='z')
            .map(|c| (c.to_string(), c.to_string()))
            .collect::<HashMap<_, _>>();
        Self {
            data: RwLock::new(data),
            calls: AtomicU64::new(0),
        }
    }

    /// Number of `get` calls served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStore for MemoryBackend {
    async fn get(&self, key: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.data
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(BackendError::NotFound)
    }
}
