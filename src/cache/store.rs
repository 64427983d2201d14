//! Entry Store Module
//!
//! Key to entry mapping. Holds no eviction or expiration policy.

use std::borrow::Borrow;
use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::Entry;

// == Entry Store ==
/// O(1) average lookup, insertion and removal of entries by key.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> EntryStore<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    // == Lookup ==
    /// Returns the entry for `key`, expired or not.
    pub fn lookup<Q>(&self, key: &Q) -> Option<&Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    // == Insert ==
    /// Stores `entry` under `key`.
    ///
    /// Callers route existing keys through `lookup_mut` instead. An existing
    /// slot is overwritten, which would orphan its recency node.
    pub fn insert(&mut self, key: K, entry: Entry<V>) {
        self.entries.insert(key, entry);
    }

    // == Remove ==
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    // == Count ==
    /// Physical entry count, including expired entries not yet purged.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Iterate ==
    pub fn iter(&self) -> hash_map::Iter<'_, K, Entry<V>> {
        self.entries.iter()
    }
}
