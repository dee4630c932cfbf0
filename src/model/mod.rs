//! Routing metadata records.
//!
//! # Data Flow
//! ```text
//! Control-plane event (JSON)
//!     → serde deserialize (keys validated on the way in)
//!     → PluginData / SelectorData / RuleData
//!     → store writes (cache/remove)
//! ```
//!
//! # Design Decisions
//! - Keys are non-empty newtypes; a record without its key cannot be built
//! - Payload fields are plain data and are not validated
//! - Wire names are camelCase to match the control plane

pub mod condition;
pub mod error;
pub mod key;
pub mod plugin;
pub mod rule;
pub mod selector;

/// Serde default for flags that are on unless the control plane says otherwise.
pub(crate) fn default_true() -> bool {
    true
}

pub use condition::{ConditionData, MatchMode, SelectorType};
pub use error::RecordError;
pub use key::{PluginName, RuleId, SelectorId};
pub use plugin::PluginData;
pub use rule::RuleData;
pub use selector::SelectorData;
