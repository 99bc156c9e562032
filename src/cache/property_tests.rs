//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, recency and expiry invariants of the
//! bounded cache against arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::BoundedTtlCache;

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Keys drawn from a small alphabet so sequences revisit keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: String },
    Get { key: String },
    Contains { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Contains { key }),
    ]
}

// == Reference Model ==
/// Straightforward LRU model without expiry (tests use a long TTL).
struct ModelLru {
    capacity: usize,
    // front = least recently used
    items: VecDeque<(String, String)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|(k, _)| k == key)
    }

    fn add(&mut self, key: String, value: String) -> bool {
        if let Some(pos) = self.position(&key) {
            self.items.remove(pos);
            self.items.push_back((key, value));
            return false;
        }
        let evicted = self.items.len() >= self.capacity;
        if evicted {
            self.items.pop_front();
        }
        self.items.push_back((key, value));
        evicted
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.position(key)?;
        let item = self.items.remove(pos)?;
        let value = item.1.clone();
        self.items.push_back(item);
        Some(value)
    }

    fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Length never exceeds capacity after any add of distinct keys.
    #[test]
    fn prop_capacity_invariant(
        capacity in 1usize..16,
        keys in prop::collection::vec("[a-z0-9]{1,12}", 1..100)
    ) {
        let cache = BoundedTtlCache::new(capacity, LONG_TTL).unwrap();

        for key in keys {
            cache.add(key.clone(), key);
            prop_assert!(cache.len() <= capacity, "len {} > capacity {}", cache.len(), capacity);
        }
    }

    // The cache behaves exactly like a plain LRU map while nothing expires.
    #[test]
    fn prop_matches_reference_lru(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let cache = BoundedTtlCache::new(capacity, LONG_TTL).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    let evicted = cache.add(key.clone(), value.clone());
                    prop_assert_eq!(evicted, model.add(key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), model.get(&key));
                }
                CacheOp::Contains { key } => {
                    prop_assert_eq!(cache.contains(&key), model.contains(&key));
                }
            }
            prop_assert_eq!(cache.len(), model.items.len());
        }
    }

    // After filling to capacity and reading the oldest key, the second
    // oldest is the one evicted by the next insert.
    #[test]
    fn prop_read_protects_from_eviction(
        keys in prop::collection::hash_set("[a-z]{1,8}", 3..10),
        new_key in "[0-9]{1,8}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let cache = BoundedTtlCache::new(keys.len(), LONG_TTL).unwrap();

        for key in &keys {
            cache.add(key.clone(), key.clone());
        }

        prop_assert!(cache.get(&keys[0]).is_some());
        prop_assert!(cache.add(new_key.clone(), new_key.clone()));

        prop_assert!(cache.contains(&keys[0]));
        prop_assert!(!cache.contains(&keys[1]));
        prop_assert!(cache.contains(&new_key));
    }

    // Overwriting keys already stored never evicts anything.
    #[test]
    fn prop_overwrite_never_evicts(
        keys in prop::collection::hash_set("[a-z]{1,8}", 1..8),
        rounds in 1usize..4
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let cache = BoundedTtlCache::new(keys.len(), LONG_TTL).unwrap();

        for key in &keys {
            cache.add(key.clone(), "v0".to_string());
        }
        for round in 1..=rounds {
            for key in &keys {
                let value = format!("v{}", round);
                prop_assert!(!cache.add(key.clone(), value));
            }
        }

        let expected = format!("v{}", rounds);
        for key in &keys {
            prop_assert_eq!(cache.get(key), Some(expected.clone()));
        }
        prop_assert_eq!(cache.stats().evictions, 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    // No key survives past its TTL, however often it was read.
    #[test]
    fn prop_ttl_is_absolute(
        keys in prop::collection::hash_set("[a-z]{1,8}", 1..10),
        reads in 1usize..5
    ) {
        let cache = BoundedTtlCache::new(32, Duration::from_millis(40)).unwrap();

        for key in &keys {
            cache.add(key.clone(), key.clone());
        }
        for _ in 0..reads {
            for key in &keys {
                let _ = cache.get(key);
            }
        }

        sleep(Duration::from_millis(50));

        let mut seen = HashSet::new();
        for key in &keys {
            prop_assert!(!cache.contains(key));
            prop_assert_eq!(cache.get(key), None);
            seen.insert(key.clone());
        }
        prop_assert!(cache.is_empty());
        prop_assert_eq!(cache.stats().expirations, seen.len() as u64);
    }
}
