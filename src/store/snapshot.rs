//! Immutable list snapshots handed to readers.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// A point-in-time, immutable view of one keyed list.
///
/// Cloning is a reference count bump. A reader holding a snapshot keeps
/// seeing the same entries no matter what writers publish afterwards.
#[derive(Debug)]
pub struct Snapshot<V>(Arc<[Arc<V>]>);

impl<V> Snapshot<V> {
    /// True when both snapshots are the same published list.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn as_slice(&self) -> &[Arc<V>] {
        &self.0
    }
}

impl<V> Clone for Snapshot<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V> Deref for Snapshot<V> {
    type Target = [Arc<V>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<V> From<Vec<Arc<V>>> for Snapshot<V> {
    fn from(entries: Vec<Arc<V>>) -> Self {
        Self(entries.into())
    }
}

impl<'a, V> IntoIterator for &'a Snapshot<V> {
    type Item = &'a Arc<V>;
    type IntoIter = std::slice::Iter<'a, Arc<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V: Serialize> Serialize for Snapshot<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|entry| entry.as_ref()))
    }
}
