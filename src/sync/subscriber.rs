//! Applies sync events to the cache.

use std::sync::Arc;

use crate::cache::RoutingMetadataCache;
use crate::observability::metrics;
use crate::sync::event::{DataEvent, EventAction};

/// Translates control-plane events into cache writes.
#[derive(Debug, Clone)]
pub struct CacheSubscriber {
    cache: Arc<RoutingMetadataCache>,
}

impl CacheSubscriber {
    pub fn new(cache: Arc<RoutingMetadataCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<RoutingMetadataCache> {
        &self.cache
    }

    /// Apply one event.
    ///
    /// Create and update both merge; delete removes each record's key or id;
    /// refresh makes the records the group's complete set, publishing them
    /// before dropping whatever they do not mention.
    pub fn apply(&self, event: DataEvent) {
        let group = event.group();
        let action = event.action();
        let records = event.len();

        match event {
            DataEvent::Plugin { action, data } => match action {
                EventAction::Create | EventAction::Update => {
                    data.into_iter().for_each(|plugin| self.cache.cache_plugin(plugin));
                }
                EventAction::Delete => {
                    data.iter().for_each(|plugin| self.cache.remove_plugin(plugin));
                }
                EventAction::Refresh => self.cache.replace_plugins(data),
            },
            DataEvent::Selector { action, data } => match action {
                EventAction::Create | EventAction::Update => {
                    data.into_iter().for_each(|selector| self.cache.cache_selector(selector));
                }
                EventAction::Delete => data
                    .iter()
                    .for_each(|selector| self.cache.remove_selector(selector)),
                EventAction::Refresh => self.cache.replace_selectors(data),
            },
            DataEvent::Rule { action, data } => match action {
                EventAction::Create | EventAction::Update => {
                    data.into_iter().for_each(|rule| self.cache.cache_rule(rule));
                }
                EventAction::Delete => data.iter().for_each(|rule| self.cache.remove_rule(rule)),
                EventAction::Refresh => self.cache.replace_rules(data),
            },
        }

        metrics::record_sync_event(group, action.as_str());
        tracing::debug!(group, action = action.as_str(), records, "Sync event applied");
    }
}
