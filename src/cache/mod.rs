//! Routing metadata cache.
//!
//! # Data Flow
//! ```text
//! Sync collaborator                         Dispatch collaborator
//!     cache_plugin / remove_plugin    ─┐        obtain_plugin(name)
//!     cache_selector / remove_selector ├──▶ RoutingMetadataCache ──▶ obtain_selectors(plugin)
//!     cache_rule / remove_rule        ─┘        obtain_rules(selector)
//!
//!   plugins:   PluginName → PluginData              (SingletonStore)
//!   selectors: PluginName → [SelectorData] by sort  (OrderedStore)
//!   rules:     SelectorId → [RuleData] by sort      (OrderedStore)
//! ```
//!
//! # Design Decisions
//! - Constructed explicitly and shared by `Arc`; no process-global instance
//! - The three stores are independent; no cross-store referential checks
//! - Misses are `None`, never errors

pub mod routing;

pub use routing::{CacheStats, RoutingMetadataCache};
