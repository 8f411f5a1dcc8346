//! Namespace Store Module
//!
//! Key → entry map for one cache namespace, with TTL checks on read and a
//! bounded number of entries.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheKey};
use crate::error::{CatalogError, Result};

// == Namespace Store ==
/// Storage for a single namespace.
#[derive(Debug)]
pub struct NamespaceStore<T> {
    /// Key-entry storage
    entries: HashMap<CacheKey, CacheEntry<T>>,
    /// Validity window of every entry in this namespace
    ttl: Duration,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<T> NamespaceStore<T> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `ttl` - Validity window for entries
    /// * `max_entries` - Maximum number of entries; zero disables the store
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and still valid.
    pub fn get_fresh(&self, key: &CacheKey) -> Option<&T> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| &entry.data)
    }

    /// Returns the entry for `key` whether or not it has expired.
    pub fn get_any(&self, key: &CacheKey) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    // == Insert ==
    /// Stores `data` under `key`, replacing any previous entry.
    ///
    /// When inserting a new key into a full store, expired entries are
    /// dropped first, then the oldest entry is evicted.
    ///
    /// # Returns
    /// The number of entries removed to make room, or `CacheFull` when the
    /// store was created with no capacity.
    pub fn insert(&mut self, key: CacheKey, data: T) -> Result<usize> {
        if self.max_entries == 0 {
            return Err(CatalogError::CacheFull(format!("No capacity for key {key}")));
        }

        let mut removed = 0;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            removed += self.cleanup_expired();

            if self.entries.len() >= self.max_entries {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.timestamp)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    self.entries.remove(&oldest);
                    removed += 1;
                }
            }
        }

        self.entries.insert(key, CacheEntry::new(data));
        Ok(removed)
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns true if one existed.
    pub fn remove(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
