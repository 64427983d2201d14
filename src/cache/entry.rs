//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Instant;

use crate::cache::lru::Handle;

// == Cache Entry ==
/// A single cached value and its bookkeeping.
///
/// The recency handle belongs to the `RecencyList`; the entry only records
/// where its node lives.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry, None = no expiration
    pub expires_at: Option<Instant>,
    /// Position of this entry's node in the recency list
    pub handle: Handle,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry linked to `handle`.
    pub fn new(value: V, expires_at: Option<Instant>, handle: Handle) -> Self {
        Self {
            value,
            expires_at,
            handle,
        }
    }

    // == Refresh ==
    /// Replaces value and expiry in place, keeping the recency handle.
    pub fn refresh(&mut self, value: V, expires_at: Option<Instant>) {
        self.value = value;
        self.expires_at = expires_at;
    }

    // == Never Expires ==
    pub fn never_expires(&self) -> bool {
        self.expires_at.is_none()
    }
}
