//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions and
//! expirations.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups for keys that were not present
    pub misses: u64,
    /// Entries removed to make room under the capacity bound
    pub evictions: u64,
    /// Entries purged because their TTL elapsed
    pub expirations: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Accumulates counters. Lives inside the cache lock, so no atomics.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    current: CacheStats,
}

impl StatsRecorder {
    // == Constructor ==
    /// Creates a recorder with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.current.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.current.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.current.evictions += 1;
    }

    /// Records `count` expirations at once, for sweeps.
    pub fn record_expirations(&mut self, count: u64) {
        self.current.expirations += count;
    }

    pub fn record_expiration(&mut self) {
        self.record_expirations(1);
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> CacheStats {
        self.current
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        self.current = CacheStats::default();
    }
}
