//! Cache Engine Module
//!
//! Thread-safe cache combining the entry store, the recency list, TTL
//! expiration and statistics behind a single lock.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{
    CacheStats, Clock, Entry, EntryStore, ExpirationPolicy, LruEviction, RecencyList,
    StatsRecorder, SystemClock, TtlStatus,
};
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == Cache State ==
/// Everything that must move in lockstep. Only touched under the lock.
#[derive(Debug)]
struct CacheState<K, V> {
    store: EntryStore<K, V>,
    recency: RecencyList<K>,
    stats: StatsRecorder,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash,
{
    /// Removes the entry from both the store and the recency list.
    fn remove_entry<Q>(&mut self, key: &Q) -> Option<Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.store.remove(key)?;
        self.recency.remove(entry.handle);
        Some(entry)
    }

    /// Purges `key` if it is present and expired, recording one expiration.
    ///
    /// Shared by every lookup path and by the eager sweep.
    fn purge_if_expired<Q>(&mut self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = self
            .store
            .lookup(key)
            .map_or(false, |entry| ExpirationPolicy::is_expired(entry.expires_at, now));

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
        }
        expired
    }
}

// == Cache ==
/// Bounded cache with LRU eviction and per-entry TTL.
///
/// Every operation runs under one exclusive lock, so concurrent calls behave
/// as some sequential order of lock acquisition. Share it with `Arc`.
///
/// Expiration is lazy: an expired entry is purged when a lookup finds it, or
/// when `cleanup_expired` sweeps the cache.
#[derive(Debug)]
pub struct Cache<K, V, C = SystemClock> {
    state: Mutex<CacheState<K, V>>,
    capacity: usize,
    expiration: ExpirationPolicy,
    eviction: LruEviction,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// `default_ttl` applies to entries written without an explicit TTL;
    /// zero means they never expire.
    ///
    /// # Errors
    /// `CacheError::Configuration` if `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, default_ttl, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, default_ttl: Duration, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::Configuration(
                "capacity must be greater than zero".to_string(),
            ));
        }

        let reserve = capacity.min(PREALLOC_LIMIT);
        debug!(
            capacity,
            default_ttl_ms = default_ttl.as_millis() as u64,
            "cache created"
        );

        Ok(Self {
            state: Mutex::new(CacheState {
                store: EntryStore::with_capacity(reserve),
                recency: RecencyList::with_capacity(reserve),
                stats: StatsRecorder::new(),
            }),
            capacity,
            expiration: ExpirationPolicy::new(default_ttl),
            eviction: LruEviction,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a clone of the value for `key`.
    ///
    /// A live entry becomes the most recently used and counts as a hit. A
    /// missing key counts as a miss. An expired entry is purged and counts as
    /// an expiration, not a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let now = self.clock.now();

        if state.purge_if_expired(key, now) {
            return None;
        }

        match state.store.lookup(key) {
            Some(entry) => {
                state.recency.move_to_front(entry.handle);
                state.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                state.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key`.
    ///
    /// `ttl` overrides the default TTL; `Some(Duration::ZERO)` stores an entry
    /// that never expires. Writing an existing key (even an expired one)
    /// replaces value and expiry in place and never evicts. Writing a new key
    /// into a full cache first evicts the least recently used entry.
    pub fn put(&self, key: K, value: V, ttl: Option<Duration>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let now = self.clock.now();
        let expires_at = self.expiration.compute_expiry(now, ttl);

        if let Some(entry) = state.store.lookup_mut(&key) {
            entry.refresh(value, expires_at);
            state.recency.move_to_front(entry.handle);
            return;
        }

        if self
            .eviction
            .needs_eviction(state.store.count(), self.capacity)
        {
            // An expired victim still counts as an eviction only.
            if let Some(victim) = self.eviction.select_victim(&mut state.recency) {
                state.store.remove(&victim);
                state.stats.record_eviction();
                trace!(capacity = self.capacity, "evicted least recently used entry");
            }
        }

        let handle = state.recency.push_front(key.clone());
        state.store.insert(key, Entry::new(value, expires_at, handle));
    }

    // == Delete ==
    /// Removes `key`.
    ///
    /// Returns true if an entry was present. Deleting an expired entry also
    /// returns true and records an expiration.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.state.lock();
        let now = self.clock.now();

        if guard.purge_if_expired(key, now) {
            return true;
        }
        guard.remove_entry(key).is_some()
    }

    // == Contains ==
    /// Checks if `key` is live without touching recency or hit/miss counters.
    ///
    /// Purges the entry if it turns out to be expired.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.state.lock();
        let now = self.clock.now();

        !guard.purge_if_expired(key, now) && guard.store.lookup(key).is_some()
    }

    // == Remaining TTL ==
    /// Reports how long `key` has left to live.
    pub fn remaining_ttl<Q>(&self, key: &Q) -> TtlStatus
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut guard = self.state.lock();
        let now = self.clock.now();

        if guard.purge_if_expired(key, now) {
            return TtlStatus::Missing;
        }
        guard
            .store
            .lookup(key)
            .map_or(TtlStatus::Missing, |entry| {
                ExpirationPolicy::remaining(entry.expires_at, now)
            })
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&self) {
        let mut guard = self.state.lock();
        let removed = guard.store.count();
        guard.store.clear();
        guard.recency.clear();
        debug!(removed, "cache cleared");
    }

    // == Length ==
    /// Number of live entries.
    ///
    /// Expired entries still in the store are skipped but not purged, so this
    /// is O(n) and has no side effects.
    pub fn len(&self) -> usize {
        let guard = self.state.lock();
        let now = self.clock.now();

        guard
            .store
            .iter()
            .filter(|(_, entry)| !ExpirationPolicy::is_expired(entry.expires_at, now))
            .count()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats.snapshot()
    }

    /// Zeroes the counters without touching entries.
    pub fn reset_stats(&self) {
        self.state.lock().stats.reset();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed, each recorded as an expiration.
    pub fn cleanup_expired(&self) -> usize {
        let mut guard = self.state.lock();
        let now = self.clock.now();

        let expired: Vec<K> = guard
            .store
            .iter()
            .filter(|(_, entry)| ExpirationPolicy::is_expired(entry.expires_at, now))
            .map(|(key, _)| key.clone())
            .collect();

        let removed = expired
            .iter()
            .filter(|key| guard.purge_if_expired(*key, now))
            .count();

        debug!(removed, "expired entries swept");
        removed
    }

    // == Accessors ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.expiration.default_ttl()
    }
}
