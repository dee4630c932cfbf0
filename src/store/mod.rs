//! Generic keyed stores backing the routing metadata cache.
//!
//! # Data Flow
//! ```text
//! Write (sync collaborator):
//!     record
//!     → singleton.rs: replace value under record key
//!     → ordered.rs:   read snapshot → merge/remove → compare-and-swap publish
//!
//! Read (dispatch path):
//!     key → Arc clone of the current value / snapshot
//! ```
//!
//! # Design Decisions
//! - Sharded maps (DashMap): writes to different keys do not contend
//! - Ordered lists are immutable `Snapshot`s, replaced wholesale, never edited
//! - Same-key writers serialize through compare-and-swap on the snapshot pointer
//! - Same id in a merge always means "replace", whatever its sort position

pub mod ordered;
pub mod singleton;
pub mod snapshot;

use std::fmt::Debug;
use std::hash::Hash;

pub use ordered::OrderedStore;
pub use singleton::SingletonStore;
pub use snapshot::Snapshot;

/// A record stored one-per-key.
pub trait SingletonRecord: Send + Sync + 'static {
    type Key: Eq + Hash + Clone + Debug + Send + Sync + 'static;

    fn key(&self) -> &Self::Key;
}

/// A record stored in an ordered, unique-by-id list under a group key.
pub trait OrderedRecord: Send + Sync + 'static {
    /// Key of the owning list (the parent record).
    type Group: Eq + Hash + Clone + Debug + Send + Sync + 'static;
    /// Identity within the list; also the sort tie-breaker.
    type Id: Ord + Clone + Debug + Send + Sync + 'static;

    fn group(&self) -> &Self::Group;

    fn id(&self) -> &Self::Id;

    /// Ascending priority within the group.
    fn sort_order(&self) -> i32;
}
