//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration and LRU eviction.

mod clock;
mod engine;
mod entry;
mod eviction;
mod expiration;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::Cache;
pub use entry::Entry;
pub use eviction::LruEviction;
pub use expiration::{ttl_from_secs, ExpirationPolicy, TtlStatus};
pub use lru::{Handle, RecencyList};
pub use stats::{CacheStats, StatsRecorder};
pub use store::EntryStore;
