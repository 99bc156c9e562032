//! TTL Cleanup Task
//!
//! Background task that periodically purges expired cache entries, so keys
//! nobody reads again do not hold capacity until LRU pressure evicts them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::BoundedTtlCache;

/// Spawns a background task that purges expired entries every `interval`.
///
/// Each pass holds the cache lock only for the duration of the purge.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during graceful
/// shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedTtlCache::new(1000, Duration::from_secs(30))?);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<BoundedTtlCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
