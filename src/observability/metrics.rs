//! Metrics collection and exposition.
//!
//! # Metrics
//! - `routing_cache_hits_total` (counter): reads that found a value, by store
//! - `routing_cache_misses_total` (counter): reads that found nothing, by store
//! - `routing_cache_write_conflicts_total` (counter): snapshot CAS retries, by store
//! - `routing_cache_entries` (gauge): keys per store
//! - `routing_cache_sync_events_total` (counter): applied events, by group and action
//!
//! # Design Decisions
//! - Thin wrappers over the `metrics` macros so names stay in one place
//! - Labels are static strings to keep cardinality bounded

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Metric names as constants for consistency.
pub mod names {
    pub const CACHE_HITS_TOTAL: &str = "routing_cache_hits_total";
    pub const CACHE_MISSES_TOTAL: &str = "routing_cache_misses_total";
    pub const WRITE_CONFLICTS_TOTAL: &str = "routing_cache_write_conflicts_total";
    pub const CACHE_ENTRIES: &str = "routing_cache_entries";
    pub const SYNC_EVENTS_TOTAL: &str = "routing_cache_sync_events_total";
}

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record the outcome of a read.
pub fn record_lookup(store: &'static str, hit: bool) {
    if hit {
        counter!(names::CACHE_HITS_TOTAL, "store" => store).increment(1);
    } else {
        counter!(names::CACHE_MISSES_TOTAL, "store" => store).increment(1);
    }
}

/// Record a lost compare-and-swap on a snapshot publish.
pub fn record_write_conflict(store: &'static str) {
    counter!(names::WRITE_CONFLICTS_TOTAL, "store" => store).increment(1);
}

/// Record the number of keys currently held by a store.
pub fn record_entries(store: &'static str, entries: usize) {
    gauge!(names::CACHE_ENTRIES, "store" => store).set(entries as f64);
}

/// Record one applied sync event.
pub fn record_sync_event(group: &'static str, action: &'static str) {
    counter!(names::SYNC_EVENTS_TOTAL, "group" => group, "action" => action).increment(1);
}
