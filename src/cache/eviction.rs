//! Eviction Policy Module
//!
//! Picks the entry to drop when an insert would exceed capacity.

use crate::cache::lru::RecencyList;

// == LRU Eviction ==
/// Always evicts the least recently used entry (the recency list tail).
#[derive(Debug, Clone, Copy, Default)]
pub struct LruEviction;

impl LruEviction {
    // == Needs Eviction ==
    /// True when inserting one more key into `count` entries would exceed
    /// `capacity`.
    pub fn needs_eviction(&self, count: usize, capacity: usize) -> bool {
        count >= capacity
    }

    // == Select Victim ==
    /// Detaches the victim from `list` and returns its key.
    ///
    /// Returns None only if the list is empty.
    pub fn select_victim<K>(&self, list: &mut RecencyList<K>) -> Option<K> {
        list.remove_tail()
    }
}
