//! Control-plane event intake.
//!
//! # Data Flow
//! ```text
//! Event source (JSON lines, channel producer)
//!     → event.rs (DataEvent: group + action + records)
//!     → worker.rs (bounded mpsc drain, shutdown aware)
//!     → subscriber.rs (map action to cache writes)
//!     → RoutingMetadataCache
//! ```
//!
//! # Design Decisions
//! - Events for one group are applied in arrival order by a single worker
//! - Delete of unknown records is a no-op, so replays are harmless
//! - Refresh replaces a whole store (full resync)

pub mod event;
pub mod subscriber;
pub mod worker;

pub use event::{read_event_stream, DataEvent, EventAction, SyncError};
pub use subscriber::CacheSubscriber;
pub use worker::SyncWorker;
