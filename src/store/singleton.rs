//! Keyed singleton store: one record per key, replace on write.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::StoreConfig;
use crate::store::SingletonRecord;

/// Thread-safe map of key to the latest record written under it.
#[derive(Debug)]
pub struct SingletonStore<V: SingletonRecord> {
    name: &'static str,
    entries: DashMap<V::Key, Arc<V>>,
}

impl<V: SingletonRecord> SingletonStore<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
        }
    }

    pub fn with_config(name: &'static str, config: &StoreConfig) -> Self {
        let entries = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };
        Self { name, entries }
    }

    /// Store `record`, returning the record it replaced.
    pub fn put(&self, record: V) -> Option<Arc<V>> {
        let key = record.key().clone();
        let previous = self.entries.insert(key.clone(), Arc::new(record));
        tracing::debug!(
            store = self.name,
            key = ?key,
            replaced = previous.is_some(),
            "Record stored"
        );
        previous
    }

    /// Remove the entry under `record`'s key. Absent keys are a no-op.
    pub fn remove(&self, record: &V) -> Option<Arc<V>> {
        let removed = self.entries.remove(record.key()).map(|(_, value)| value);
        tracing::debug!(
            store = self.name,
            key = ?record.key(),
            removed = removed.is_some(),
            "Record removed"
        );
        removed
    }

    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        V::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Make the store hold exactly `records`.
    ///
    /// New values are written before keys missing from `records` are
    /// dropped, so a key present on both sides is never absent to readers.
    pub fn replace_all(&self, records: Vec<V>) {
        let mut keep: HashSet<V::Key> = HashSet::with_capacity(records.len());
        for record in records {
            let key = record.key().clone();
            self.entries.insert(key.clone(), Arc::new(record));
            keep.insert(key);
        }
        self.entries.retain(|key, _| keep.contains(key));
        tracing::debug!(store = self.name, entries = keep.len(), "Store replaced");
    }

    pub fn clear(&self) {
        self.entries.clear();
        tracing::debug!(store = self.name, "Store cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys present at the time of the call, in no particular order.
    pub fn keys(&self) -> Vec<V::Key> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
