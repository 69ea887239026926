use crate::models::Table;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CachedTable {
    pub table: Table,
    pub fetched_at: DateTime<Utc>,
}

/// Read-through cache of fetched source tables, keyed by source location.
/// Entries live until invalidated (or the process exits).
#[derive(Debug, Default)]
pub struct SourceCache {
    entries: HashMap<String, CachedTable>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CachedTable> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: &str, table: Table) -> &CachedTable {
        self.insert_at(key, table, Utc::now())
    }

    pub fn insert_at(&mut self, key: &str, table: Table, fetched_at: DateTime<Utc>) -> &CachedTable {
        self.entries.insert(key.to_string(), CachedTable { table, fetched_at });
        &self.entries[key]
    }

    /// Drop one entry; returns whether it existed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
