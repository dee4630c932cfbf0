//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Stores, cache facade, sync worker produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Metric updates are no-ops until a recorder is installed
//! - Log level from config, overridable with RUST_LOG

pub mod logging;
pub mod metrics;
