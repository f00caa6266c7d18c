//! In-memory result cache
//!
//! Stores the `data` of query results keyed by document text and variables.
//! No normalization and no eviction: entries live until they are evicted
//! explicitly or the store is cleared.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

/// Cache key: document source plus canonical variables JSON
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    variables: String,
}

impl CacheKey {
    pub fn new(query: &str, variables: Option<&Value>) -> Self {
        // serde_json maps are ordered by key, so the rendering is canonical
        let variables = match variables {
            None | Some(Value::Null) => String::new(),
            Some(Value::Object(map)) if map.is_empty() => String::new(),
            Some(v) => v.to_string(),
        };
        Self {
            query: query.to_string(),
            variables,
        }
    }
}

/// Thread-safe in-memory cache shared by a client
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<CacheKey, Value>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, key: &CacheKey) -> Option<Value> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    pub fn write(&self, key: CacheKey, data: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, data);
        }
    }

    /// Remove one entry, returning whether it was present
    pub fn evict(&self, key: &CacheKey) -> bool {
        self.entries
            .write()
            .map(|mut entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
