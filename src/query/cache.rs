use std::time::Instant;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::key::{Operation, QueryKey, Resource};

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    stale: bool,
    updated_at: Instant,
}

/// Query results keyed by [`QueryKey`], in insertion order.
///
/// Entries hold JSON so that one cache serves every resource; reads decode
/// into the caller's type. Invalidated entries keep their data until the
/// next fetch replaces it.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: IndexMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        match serde_json::from_value(entry.data.clone()) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(%key, %err, "cached value has an unexpected shape");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: QueryKey, data: &T) -> Result<()> {
        let data = serde_json::to_value(data)
            .with_context(|| format!("failed to encode cache entry {key}"))?;
        tracing::debug!(%key, "cache set");
        self.entries.insert(
            key,
            CacheEntry {
                data,
                stale: false,
                updated_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Replaces the entry with `update(current)`; `None` from the updater
    /// leaves the cache untouched.
    pub fn update<T, F>(&mut self, key: QueryKey, update: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> Option<T>,
    {
        let current = self.get::<T>(&key);
        match update(current) {
            Some(next) => self.set(key, &next),
            None => Ok(()),
        }
    }

    pub fn remove(&mut self, key: &QueryKey) -> bool {
        tracing::debug!(%key, "cache remove");
        self.entries.shift_remove(key).is_some()
    }

    /// Flags every entry under the prefix as stale; returns how many matched.
    pub fn invalidate(&mut self, resource: Resource, operation: Option<Operation>) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(resource, operation) {
                entry.stale = true;
                count += 1;
            }
        }
        tracing::debug!(resource = resource.as_str(), ?operation, count, "cache invalidate");
        count
    }

    pub fn invalidate_key(&mut self, key: &QueryKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Missing entries count as stale.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_none_or(|entry| entry.stale)
    }

    pub fn updated_at(&self, key: &QueryKey) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.updated_at)
    }

    pub fn keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.entries.keys()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
