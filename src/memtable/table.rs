//! MemTable implementation
//!
//! HashMap-based table with RwLock for concurrency.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;

/// In-memory key/value table
#[derive(Debug, Default)]
pub struct MemTable {
    data: RwLock<HashMap<String, String>>,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key (read lock)
    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    /// Check whether a key is present (read lock)
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Insert a key/value pair if the key is absent (write lock)
    ///
    /// Returns `false` and leaves the table untouched when the key exists.
    /// The check and the insert happen under one write guard.
    pub fn insert(&self, key: String, value: String) -> bool {
        match self.data.write().entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Get entry count (read lock)
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}
