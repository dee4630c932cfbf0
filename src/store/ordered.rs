//! Keyed ordered-set store.
//!
//! # Responsibilities
//! - Map a group key to a sorted, unique-by-id list of records
//! - Merge writes into the list (same id replaces, then re-sort)
//! - Hand readers immutable snapshots
//!
//! # Design Decisions
//! - Merge and removal build a new list from the snapshot they read, then
//!   publish it only if the key still holds that exact snapshot. A writer
//!   that loses the race re-reads and retries, so concurrent same-key writes
//!   are never lost and no read-modify-write spans an unlocked gap.
//! - The shard lock is held only for the pointer swap, not for the merge.
//!   A read takes the shard read lock just long enough to clone the `Arc`,
//!   so it can wait on a concurrent swap in the same shard (never on a merge).
//!   Reads are short-blocking, not lock-free.
//! - A full replacement publishes every incoming group before dropping the
//!   groups it did not mention; a key present on both sides never reads as
//!   absent.
//! - Sort is by `sort_order`, ties broken by id, so the result does not
//!   depend on arrival order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::StoreConfig;
use crate::observability::metrics;
use crate::store::snapshot::Snapshot;
use crate::store::OrderedRecord;

/// Thread-safe map of group key to ordered record snapshot.
#[derive(Debug)]
pub struct OrderedStore<V: OrderedRecord> {
    /// Store label for logs and metrics.
    name: &'static str,
    groups: DashMap<V::Group, Snapshot<V>>,
}

impl<V: OrderedRecord> OrderedStore<V> {
    /// Create an empty store with default sizing.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            groups: DashMap::new(),
        }
    }

    /// Create an empty store sized from configuration.
    ///
    /// `shard_amount` must already be validated (power of two, > 1).
    pub fn with_config(name: &'static str, config: &StoreConfig) -> Self {
        let groups = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };
        Self { name, groups }
    }

    /// Merge `record` into its group's list.
    ///
    /// An existing entry with the same id is replaced by `record`.
    pub fn put(&self, record: V) {
        let record = Arc::new(record);
        loop {
            let current = self.get(record.group());
            let next = merge(current.as_deref().unwrap_or(&[]), &record);
            if self.publish(record.group(), current.as_ref(), next) {
                break;
            }
            metrics::record_write_conflict(self.name);
        }
        tracing::debug!(
            store = self.name,
            group = ?record.group(),
            id = ?record.id(),
            sort = record.sort_order(),
            "Record merged"
        );
    }

    /// Remove the entry with `record`'s id from `record`'s group.
    ///
    /// Returns `false` when the group or the id is absent; nothing changes then.
    pub fn remove(&self, record: &V) -> bool {
        let group = record.group();
        let id = record.id();
        loop {
            let Some(current) = self.get(group) else {
                tracing::debug!(store = self.name, group = ?group, "Remove skipped, no such group");
                return false;
            };
            if !current.iter().any(|entry| entry.id() == id) {
                tracing::debug!(
                    store = self.name,
                    group = ?group,
                    id = ?id,
                    "Remove skipped, no such id"
                );
                return false;
            }

            let next: Vec<Arc<V>> = current
                .iter()
                .filter(|entry| entry.id() != id)
                .cloned()
                .collect();
            if self.publish(group, Some(&current), Snapshot::from(next)) {
                tracing::debug!(store = self.name, group = ?group, id = ?id, "Record removed");
                return true;
            }
            metrics::record_write_conflict(self.name);
        }
    }

    /// Current snapshot for `group`, or `None` if nothing was ever cached there.
    pub fn get<Q>(&self, group: &Q) -> Option<Snapshot<V>>
    where
        V::Group: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.groups.get(group).map(|entry| entry.value().clone())
    }

    /// Make the store hold exactly `records`.
    ///
    /// Within a group the last record for an id wins. Every incoming group is
    /// swapped in whole first; groups missing from `records` are dropped
    /// afterwards.
    pub fn replace_all(&self, records: Vec<V>) {
        let mut incoming: HashMap<V::Group, Vec<Arc<V>>> = HashMap::new();
        for record in records {
            let record = Arc::new(record);
            let list = incoming.entry(record.group().clone()).or_default();
            list.retain(|entry| entry.id() != record.id());
            list.push(record);
        }

        for (group, list) in incoming.iter_mut() {
            let mut list = std::mem::take(list);
            sort_entries(&mut list);
            self.groups.insert(group.clone(), Snapshot::from(list));
        }
        self.groups.retain(|group, _| incoming.contains_key(group));

        tracing::debug!(store = self.name, groups = incoming.len(), "Store replaced");
    }

    /// Drop every group.
    pub fn clear(&self) {
        self.groups.clear();
        tracing::debug!(store = self.name, "Store cleared");
    }

    /// Number of group keys.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the group's snapshot with `next` if it still holds `expected`.
    ///
    /// `expected == None` means the group must still be absent.
    fn publish(
        &self,
        group: &V::Group,
        expected: Option<&Snapshot<V>>,
        next: Snapshot<V>,
    ) -> bool {
        match (self.groups.entry(group.clone()), expected) {
            (Entry::Occupied(mut slot), Some(expected))
                if Snapshot::ptr_eq(slot.get(), expected) =>
            {
                slot.insert(next);
                true
            }
            (Entry::Vacant(slot), None) => {
                slot.insert(next);
                true
            }
            _ => false,
        }
    }
}

/// Build the list that results from writing `record` over `current`.
fn merge<V: OrderedRecord>(current: &[Arc<V>], record: &Arc<V>) -> Snapshot<V> {
    let mut next: Vec<Arc<V>> = Vec::with_capacity(current.len() + 1);
    next.extend(
        current
            .iter()
            .filter(|entry| entry.id() != record.id())
            .cloned(),
    );
    next.push(Arc::clone(record));
    sort_entries(&mut next);
    Snapshot::from(next)
}

fn sort_entries<V: OrderedRecord>(entries: &mut [Arc<V>]) {
    entries.sort_by(|a, b| {
        a.sort_order()
            .cmp(&b.sort_order())
            .then_with(|| a.id().cmp(b.id()))
    });
}
