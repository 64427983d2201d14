//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, LRU ordering, TTL and statistics
//! properties, plus a concurrency check against a sequential model.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::cache::{Cache, CacheStats, ManualClock};

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-l]".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String, ttl_secs: Option<u64> },
    Get { key: String },
    Delete { key: String },
    Advance { secs: u64 },
    Cleanup,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), prop::option::of(0u64..5))
            .prop_map(|(key, value, ttl_secs)| CacheOp::Put { key, value, ttl_secs }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => (1u64..4).prop_map(|secs| CacheOp::Advance { secs }),
        1 => Just(CacheOp::Cleanup),
    ]
}

// == Reference Model ==
/// Straightforward sequential model: a VecDeque for recency (front = most
/// recent) and a map of key -> (value, absolute expiry second).
#[derive(Debug, Default)]
struct Model {
    order: VecDeque<String>,
    entries: HashMap<String, (String, Option<u64>)>,
    now: u64,
    stats: CacheStats,
}

impl Model {
    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_front(key.to_string());
    }

    fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.entries.remove(key);
    }

    fn is_expired(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some((_, Some(at))) if self.now >= *at)
    }

    fn apply(&mut self, op: &CacheOp) -> Option<String> {
        match op {
            CacheOp::Put { key, value, ttl_secs } => {
                let ttl = ttl_secs.unwrap_or(TEST_DEFAULT_TTL.as_secs());
                let expires = (ttl > 0).then(|| self.now + ttl);
                if !self.entries.contains_key(key) && self.entries.len() >= TEST_CAPACITY {
                    if let Some(victim) = self.order.pop_back() {
                        self.entries.remove(&victim);
                        self.stats.evictions += 1;
                    }
                }
                self.entries.insert(key.clone(), (value.clone(), expires));
                self.touch(key);
                None
            }
            CacheOp::Get { key } => {
                if self.is_expired(key) {
                    self.forget(key);
                    self.stats.expirations += 1;
                    return None;
                }
                match self.entries.get(key).cloned() {
                    Some((value, _)) => {
                        self.touch(key);
                        self.stats.hits += 1;
                        Some(value)
                    }
                    None => {
                        self.stats.misses += 1;
                        None
                    }
                }
            }
            CacheOp::Delete { key } => {
                if self.is_expired(key) {
                    self.stats.expirations += 1;
                }
                self.forget(key);
                None
            }
            CacheOp::Advance { secs } => {
                self.now += secs;
                None
            }
            CacheOp::Cleanup => {
                let expired: Vec<String> = self
                    .entries
                    .keys()
                    .filter(|k| self.is_expired(k))
                    .cloned()
                    .collect();
                for key in &expired {
                    self.forget(key);
                }
                self.stats.expirations += expired.len() as u64;
                None
            }
        }
    }

    fn live_len(&self) -> usize {
        self.entries.keys().filter(|k| !self.is_expired(k)).count()
    }
}

fn apply(cache: &Cache<String, String, ManualClock>, clock: &ManualClock, op: &CacheOp) -> Option<String> {
    match op {
        CacheOp::Put { key, value, ttl_secs } => {
            cache.put(key.clone(), value.clone(), ttl_secs.map(Duration::from_secs));
            None
        }
        CacheOp::Get { key } => cache.get(key),
        CacheOp::Delete { key } => {
            cache.delete(key);
            None
        }
        CacheOp::Advance { secs } => {
            clock.advance(Duration::from_secs(*secs));
            None
        }
        CacheOp::Cleanup => {
            cache.cleanup_expired();
            None
        }
    }
}

fn new_cache(capacity: usize) -> (Cache<String, String, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let cache = Cache::with_clock(capacity, TEST_DEFAULT_TTL, clock.clone()).unwrap();
    (cache, clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any operation sequence matches the sequential model: same values
    // returned, same live size, same counters.
    #[test]
    fn prop_matches_sequential_model(ops in prop::collection::vec(cache_op_strategy(), 1..120)) {
        let (cache, clock) = new_cache(TEST_CAPACITY);
        let mut model = Model::default();

        for op in &ops {
            let expected = model.apply(op);
            let actual = apply(&cache, &clock, op);
            prop_assert_eq!(actual, expected, "diverged on {:?}", op);
            prop_assert_eq!(cache.len(), model.live_len(), "size diverged on {:?}", op);
        }

        prop_assert_eq!(cache.stats(), model.stats);
    }

    // The number of entries never exceeds capacity after any put.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec("[a-zA-Z0-9_]{1,16}", 1..200),
        capacity in 1usize..20
    ) {
        let (cache, _) = new_cache(capacity);

        for key in keys {
            cache.put(key, "v".to_string(), None);
            prop_assert!(
                cache.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.len(),
                capacity
            );
        }
    }

    // Filling to capacity and adding one more key evicts exactly the first
    // key written, unless it was read in between.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::hash_set("[a-z]{1,8}", 2..10),
        touch_first in any::<bool>()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (cache, _) = new_cache(keys.len());

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key), None);
        }
        if touch_first {
            prop_assert!(cache.get(&keys[0]).is_some());
        }

        cache.put("NEW".to_string(), "new".to_string(), None);

        let expected_victim = if touch_first { &keys[1] } else { &keys[0] };
        prop_assert!(!cache.contains(expected_victim));
        prop_assert!(cache.contains("NEW"));
        prop_assert_eq!(cache.len(), keys.len());
        for key in keys.iter().filter(|k| *k != expected_victim) {
            prop_assert!(cache.contains(key), "Key '{}' should still exist", key);
        }
    }

    // Zero TTL survives any amount of elapsed time.
    #[test]
    fn prop_zero_ttl_never_expires(key in key_strategy(), value in value_strategy(), secs in 0u64..10_000_000) {
        let (cache, clock) = new_cache(TEST_CAPACITY);

        cache.put(key.clone(), value.clone(), Some(Duration::ZERO));
        clock.advance(Duration::from_secs(secs));

        prop_assert_eq!(cache.get(&key), Some(value));
        prop_assert_eq!(cache.stats().expirations, 0);
    }

    // Entries are gone once their TTL elapses and counted as expirations.
    #[test]
    fn prop_ttl_expiration_behavior(key in key_strategy(), value in value_strategy(), ttl in 1u64..1000) {
        let (cache, clock) = new_cache(TEST_CAPACITY);

        cache.put(key.clone(), value.clone(), Some(Duration::from_millis(ttl)));
        clock.advance(Duration::from_millis(ttl - 1));
        prop_assert_eq!(cache.get(&key), Some(value));

        clock.advance(Duration::from_millis(1));
        prop_assert_eq!(cache.get(&key), None);

        let stats = cache.stats();
        prop_assert_eq!(stats.expirations, 1);
        prop_assert_eq!(stats.misses, 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Threads working on disjoint keys lose no updates and double count
    // nothing: with capacity for every key, the totals are exact.
    #[test]
    fn prop_concurrent_disjoint_keys(threads in 2usize..6, per_thread in 1usize..50) {
        let cache: Arc<Cache<String, usize>> =
            Arc::new(Cache::new(threads * per_thread, TEST_DEFAULT_TTL).unwrap());

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        let key = format!("t{t}-k{i}");
                        cache.put(key.clone(), i, None);
                        assert_eq!(cache.get(&key), Some(i));
                        assert_eq!(cache.get(&format!("t{t}-missing{i}")), None);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let total = (threads * per_thread) as u64;
        prop_assert_eq!(cache.len(), threads * per_thread);
        prop_assert_eq!(
            cache.stats(),
            CacheStats { hits: total, misses: total, evictions: 0, expirations: 0 }
        );
    }

    // Under capacity pressure the bound still holds and every write is
    // accounted for: live entries + evictions == distinct keys written.
    #[test]
    fn prop_concurrent_eviction_accounting(threads in 2usize..6, per_thread in 10usize..60, capacity in 1usize..16) {
        let cache: Arc<Cache<String, usize>> =
            Arc::new(Cache::new(capacity, TEST_DEFAULT_TTL).unwrap());

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        cache.put(format!("t{t}-k{i}"), i, None);
                        assert!(cache.len() <= capacity);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let written = (threads * per_thread) as u64;
        prop_assert!(cache.len() <= capacity);
        prop_assert_eq!(cache.len() as u64 + cache.stats().evictions, written);
    }
}
