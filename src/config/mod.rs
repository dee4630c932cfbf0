//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → CacheConfig (validated, immutable)
//!     → store sizing, sync channel, logging/metrics setup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks
//! - Config is read once at startup; the cache itself has no reloadable knobs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CacheConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::StoreConfig;
pub use schema::SyncConfig;
