//! Read-Through Scenario Tests
//!
//! Drives the read-through client the way the proxy is wired in production:
//! a two-slot cache with a one millisecond TTL in front of a store holding
//! every lowercase letter mapped to itself.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use redis_proxy::{BoundedTtlCache, MemoryBackend, ProxyError, ReadThroughClient};

fn scenario_client() -> (Arc<BoundedTtlCache>, Arc<MemoryBackend>, ReadThroughClient) {
    let cache = Arc::new(BoundedTtlCache::new(2, Duration::from_millis(1)).unwrap());
    let backend = Arc::new(MemoryBackend::with_lowercase_letters());
    let client = ReadThroughClient::new(cache.clone(), backend.clone());
    (cache, backend, client)
}

#[tokio::test]
async fn test_fetch_from_backend_then_expire_and_evict() {
    let (cache, backend, client) = scenario_client();

    // Miss, fetched from the backend
    assert!(!cache.contains("a"));
    assert_eq!(client.get("a").await.unwrap(), "a");
    assert_eq!(backend.calls(), 1);

    // Unknown to the backend; cache keeps only `a`
    let err = client.get("1").await.unwrap_err();
    assert!(matches!(err, ProxyError::BackendFetchFailed { ref key, .. } if key == "1"));
    assert!(!cache.contains("1"));
    assert_eq!(cache.len(), 1);

    tokio::time::sleep(Duration::from_millis(10)).await;

    // Expired: refetched from the backend
    assert!(!cache.contains("a"));
    assert_eq!(client.get("a").await.unwrap(), "a");
    assert_eq!(backend.calls(), 3);
    assert_eq!(cache.get("b"), None);

    // Two more keys fill the two slots and push `a` out
    assert_eq!(client.get("b").await.unwrap(), "b");
    assert_eq!(client.get("c").await.unwrap(), "c");
    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("a"));
}

#[tokio::test]
async fn test_hit_within_ttl_skips_backend() {
    // The one millisecond scenario TTL is too short to observe a hit
    // reliably, so this step runs with a longer lifetime.
    let cache = Arc::new(BoundedTtlCache::new(2, Duration::from_secs(60)).unwrap());
    let backend = Arc::new(MemoryBackend::with_lowercase_letters());
    let client = ReadThroughClient::new(cache.clone(), backend.clone());

    assert_eq!(client.get("a").await.unwrap(), "a");
    assert!(cache.contains("a"));
    assert_eq!(client.get("a").await.unwrap(), "a");

    assert_eq!(backend.calls(), 1);
    assert_eq!(client.stats().hits, 1);
}

#[tokio::test]
async fn test_lru_eviction_through_client() {
    let cache = Arc::new(BoundedTtlCache::new(2, Duration::from_secs(60)).unwrap());
    let backend = Arc::new(MemoryBackend::with_lowercase_letters());
    let client = ReadThroughClient::new(cache.clone(), backend);

    client.get("a").await.unwrap();
    client.get("b").await.unwrap();
    client.get("a").await.unwrap();
    client.get("c").await.unwrap();

    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
    assert_eq!(cache.stats().evictions, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Whatever mix of known and unknown keys is requested, the cache only
    // ever holds keys the backend knows, and never more than its capacity.
    #[test]
    fn prop_cache_only_holds_backend_values(
        keys in prop::collection::vec("[a-z0-9]", 1..60),
        capacity in 1usize..6
    ) {
        let cache = Arc::new(BoundedTtlCache::new(capacity, Duration::from_secs(60)).unwrap());
        let client = ReadThroughClient::new(
            cache.clone(),
            Arc::new(MemoryBackend::with_lowercase_letters()),
        );

        tokio_test::block_on(async {
            for key in &keys {
                let known = key.chars().all(|c| c.is_ascii_lowercase());
                match client.get(key).await {
                    Ok(value) => {
                        prop_assert!(known);
                        prop_assert_eq!(&value, key);
                        prop_assert!(cache.contains(key));
                    }
                    Err(_) => {
                        prop_assert!(!known);
                        prop_assert!(!cache.contains(key));
                    }
                }
                prop_assert!(cache.len() <= capacity);
            }
            Ok(())
        })?;
    }
}
