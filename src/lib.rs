//! In-memory routing metadata cache for a gateway plugin pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!   control plane events                         request path
//!          │                                          │
//!          ▼                                          ▼
//!   ┌─────────────┐    ┌──────────────────────────────────────────┐
//!   │    sync     │───▶│          RoutingMetadataCache            │
//!   │ worker +    │    │  plugins   : name → PluginData           │
//!   │ subscriber  │    │  selectors : plugin → [SelectorData]     │
//!   └─────────────┘    │  rules     : selector → [RuleData]       │
//!                      └──────────────────────────────────────────┘
//!                                 │ built on
//!                                 ▼
//!                      ┌──────────────────────────┐
//!                      │ store: SingletonStore,   │
//!                      │ OrderedStore, Snapshot   │
//!                      └──────────────────────────┘
//!
//!   Cross-cutting: config (TOML), observability (tracing, metrics)
//! ```

pub mod cache;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
pub mod sync;

pub use cache::{CacheStats, RoutingMetadataCache};
pub use config::CacheConfig;
pub use model::{PluginData, RuleData, SelectorData};
pub use store::Snapshot;
