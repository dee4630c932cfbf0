//! The cache facade consulted by the request path.

use std::sync::Arc;

use serde::Serialize;

use crate::config::StoreConfig;
use crate::model::{PluginData, PluginName, RuleData, SelectorData};
use crate::observability::metrics;
use crate::store::{OrderedStore, SingletonStore, Snapshot};

const PLUGIN_STORE: &str = "plugin";
const SELECTOR_STORE: &str = "selector";
const RULE_STORE: &str = "rule";

/// Point-in-time counts across the three stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub plugins: usize,
    pub selector_groups: usize,
    pub selectors: usize,
    pub rule_groups: usize,
    pub rules: usize,
}

/// In-memory plugin, selector and rule metadata.
///
/// Writes come from the sync path, reads from the request path. All
/// methods take `&self`; share the cache with `Arc<RoutingMetadataCache>`.
#[derive(Debug)]
pub struct RoutingMetadataCache {
    plugins: SingletonStore<PluginData>,
    selectors: OrderedStore<SelectorData>,
    rules: OrderedStore<RuleData>,
}

impl RoutingMetadataCache {
    /// Create an empty cache with default store sizing.
    pub fn new() -> Self {
        Self {
            plugins: SingletonStore::new(PLUGIN_STORE),
            selectors: OrderedStore::new(SELECTOR_STORE),
            rules: OrderedStore::new(RULE_STORE),
        }
    }

    /// Create an empty cache with stores sized from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            plugins: SingletonStore::with_config(PLUGIN_STORE, config),
            selectors: OrderedStore::with_config(SELECTOR_STORE, config),
            rules: OrderedStore::with_config(RULE_STORE, config),
        }
    }

    /// Convenience for sharing across tasks.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    // --- Plugins ---

    /// Store `data`, replacing any plugin with the same name.
    pub fn cache_plugin(&self, data: PluginData) {
        self.plugins.put(data);
        metrics::record_entries(PLUGIN_STORE, self.plugins.len());
    }

    /// Forget the plugin named by `data`. No-op if absent.
    pub fn remove_plugin(&self, data: &PluginData) {
        self.plugins.remove(data);
        metrics::record_entries(PLUGIN_STORE, self.plugins.len());
    }

    pub fn obtain_plugin(&self, name: &str) -> Option<Arc<PluginData>> {
        let plugin = self.plugins.get(name);
        metrics::record_lookup(PLUGIN_STORE, plugin.is_some());
        plugin
    }

    /// Names of all cached plugins, in no particular order.
    pub fn plugin_names(&self) -> Vec<PluginName> {
        self.plugins.keys()
    }

    /// Make `data` the complete plugin set.
    ///
    /// Plugins present before and after stay visible throughout.
    pub fn replace_plugins(&self, data: Vec<PluginData>) {
        self.plugins.replace_all(data);
        metrics::record_entries(PLUGIN_STORE, self.plugins.len());
    }

    /// Drop every cached plugin.
    pub fn refresh_plugins(&self) {
        self.plugins.clear();
        metrics::record_entries(PLUGIN_STORE, 0);
    }

    // --- Selectors ---

    /// Merge `data` into its plugin's selector list.
    ///
    /// A selector with the same id is replaced by `data`; the list stays
    /// sorted by `sort` ascending.
    pub fn cache_selector(&self, data: SelectorData) {
        self.selectors.put(data);
        metrics::record_entries(SELECTOR_STORE, self.selectors.group_count());
    }

    /// Remove the selector with `data.id` from `data.plugin_name`'s list.
    /// No-op if the plugin has no list or the id is not in it.
    pub fn remove_selector(&self, data: &SelectorData) {
        self.selectors.remove(data);
    }

    /// Selectors of `plugin_name` in evaluation order, or `None` if no
    /// selector was ever cached for it.
    pub fn obtain_selectors(&self, plugin_name: &str) -> Option<Snapshot<SelectorData>> {
        let selectors = self.selectors.get(plugin_name);
        metrics::record_lookup(SELECTOR_STORE, selectors.is_some());
        selectors
    }

    /// Make `data` the complete selector set, regrouped by plugin.
    ///
    /// Plugins with selectors before and after never read as absent.
    pub fn replace_selectors(&self, data: Vec<SelectorData>) {
        self.selectors.replace_all(data);
        metrics::record_entries(SELECTOR_STORE, self.selectors.group_count());
    }

    /// Drop every cached selector list.
    pub fn refresh_selectors(&self) {
        self.selectors.clear();
        metrics::record_entries(SELECTOR_STORE, 0);
    }

    // --- Rules ---

    /// Merge `data` into its selector's rule list.
    pub fn cache_rule(&self, data: RuleData) {
        self.rules.put(data);
        metrics::record_entries(RULE_STORE, self.rules.group_count());
    }

    /// Remove the rule with `data.id` from `data.selector_id`'s list.
    pub fn remove_rule(&self, data: &RuleData) {
        self.rules.remove(data);
    }

    /// Rules of `selector_id` in evaluation order, or `None` if no rule was
    /// ever cached for it.
    pub fn obtain_rules(&self, selector_id: &str) -> Option<Snapshot<RuleData>> {
        let rules = self.rules.get(selector_id);
        metrics::record_lookup(RULE_STORE, rules.is_some());
        rules
    }

    /// Make `data` the complete rule set, regrouped by selector.
    pub fn replace_rules(&self, data: Vec<RuleData>) {
        self.rules.replace_all(data);
        metrics::record_entries(RULE_STORE, self.rules.group_count());
    }

    /// Drop every cached rule list.
    pub fn refresh_rules(&self) {
        self.rules.clear();
        metrics::record_entries(RULE_STORE, 0);
    }

    /// Counts across all stores. Not atomic across stores.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            plugins: self.plugins.len(),
            selector_groups: self.selectors.group_count(),
            selectors: self.selectors.record_count(),
            rule_groups: self.rules.group_count(),
            rules: self.rules.record_count(),
        }
    }
}

impl Default for RoutingMetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selector(id: &str, plugin: &str, sort: i32) -> SelectorData {
        SelectorData::new(id, plugin, sort).unwrap()
    }

    fn selector_ids(cache: &RoutingMetadataCache, plugin: &str) -> Vec<String> {
        cache
            .obtain_selectors(plugin)
            .unwrap()
            .iter()
            .map(|s| s.id.to_string())
            .collect()
    }

    #[test]
    fn test_plugin_round_trip() {
        let cache = RoutingMetadataCache::new();
        let plugin = PluginData::new("divide")
            .unwrap()
            .with_config(json!({ "multiSelectorHandle": true }));

        cache.cache_plugin(plugin.clone());
        assert_eq!(cache.obtain_plugin("divide").as_deref(), Some(&plugin));

        cache.remove_plugin(&plugin);
        assert!(cache.obtain_plugin("divide").is_none());
    }

    #[test]
    fn test_plugin_replace() {
        let cache = RoutingMetadataCache::new();
        cache.cache_plugin(PluginData::new("waf").unwrap());
        cache.cache_plugin(PluginData::new("waf").unwrap().with_enabled(false));

        assert!(!cache.obtain_plugin("waf").unwrap().enabled);
        assert_eq!(cache.stats().plugins, 1);
    }

    #[test]
    fn test_selector_order_and_remove() {
        let cache = RoutingMetadataCache::new();
        cache.cache_selector(selector("a", "p1", 2));
        cache.cache_selector(selector("b", "p1", 1));
        assert_eq!(selector_ids(&cache, "p1"), vec!["b", "a"]);

        cache.remove_selector(&selector("b", "p1", 1));
        assert_eq!(selector_ids(&cache, "p1"), vec!["a"]);
    }

    #[test]
    fn test_selector_last_write_wins() {
        let cache = RoutingMetadataCache::new();
        cache.cache_selector(selector("a", "p1", 1).with_handle("v1"));
        cache.cache_selector(selector("a", "p1", 1).with_handle("v2"));

        let selectors = cache.obtain_selectors("p1").unwrap();
        assert_eq!(selectors.len(), 1);
        assert_eq!(selectors[0].handle.as_deref(), Some("v2"));
    }

    #[test]
    fn test_unknown_keys_are_not_found() {
        let cache = RoutingMetadataCache::new();
        assert!(cache.obtain_plugin("nonexistent").is_none());
        assert!(cache.obtain_selectors("nonexistent").is_none());
        assert!(cache.obtain_rules("nonexistent").is_none());

        // Removing children of an absent parent must not panic or create it.
        cache.remove_selector(&selector("a", "nonexistent", 1));
        cache.remove_rule(&RuleData::new("r", "nonexistent", 1).unwrap());
        assert!(cache.obtain_selectors("nonexistent").is_none());
        assert!(cache.obtain_rules("nonexistent").is_none());
    }

    #[test]
    fn test_rules_keyed_by_selector() {
        let cache = RoutingMetadataCache::new();
        cache.cache_rule(RuleData::new("r2", "s1", 2).unwrap());
        cache.cache_rule(RuleData::new("r1", "s1", 1).unwrap());
        cache.cache_rule(RuleData::new("r1", "s2", 1).unwrap());

        let rules = cache.obtain_rules("s1").unwrap();
        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
        assert_eq!(cache.obtain_rules("s2").unwrap().len(), 1);
    }

    #[test]
    fn test_replace_selectors() {
        let cache = RoutingMetadataCache::new();
        cache.cache_selector(selector("a", "p1", 1));
        cache.cache_selector(selector("old", "p1", 2));
        cache.cache_selector(selector("x", "p2", 1));

        cache.replace_selectors(vec![selector("b", "p1", 0), selector("a", "p1", 1)]);

        assert_eq!(selector_ids(&cache, "p1"), vec!["b", "a"]);
        assert!(cache.obtain_selectors("p2").is_none());
    }

    #[test]
    fn test_replace_plugins_and_rules() {
        let cache = RoutingMetadataCache::new();
        cache.cache_plugin(PluginData::new("divide").unwrap());
        cache.cache_plugin(PluginData::new("waf").unwrap());
        cache.cache_rule(RuleData::new("r1", "s1", 1).unwrap());

        cache.replace_plugins(vec![PluginData::new("divide").unwrap().with_enabled(false)]);
        cache.replace_rules(vec![RuleData::new("r2", "s2", 1).unwrap()]);

        assert!(!cache.obtain_plugin("divide").unwrap().enabled);
        assert!(cache.obtain_plugin("waf").is_none());
        assert!(cache.obtain_rules("s1").is_none());
        assert_eq!(cache.obtain_rules("s2").unwrap().len(), 1);
    }

    #[test]
    fn test_refresh_and_stats() {
        let cache = RoutingMetadataCache::from_config(&StoreConfig::default());
        cache.cache_plugin(PluginData::new("divide").unwrap());
        cache.cache_selector(selector("a", "divide", 1));
        cache.cache_selector(selector("b", "divide", 2));
        cache.cache_rule(RuleData::new("r1", "a", 1).unwrap());

        assert_eq!(
            cache.stats(),
            CacheStats {
                plugins: 1,
                selector_groups: 1,
                selectors: 2,
                rule_groups: 1,
                rules: 1,
            }
        );

        assert_eq!(cache.plugin_names(), vec![PluginName::new("divide").unwrap()]);

        cache.refresh_selectors();
        assert!(cache.obtain_selectors("divide").is_none());
        assert!(cache.obtain_plugin("divide").is_some());

        cache.refresh_plugins();
        cache.refresh_rules();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
