//! Shared record builders for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use routing_metadata_cache::model::{PluginData, RuleData, SelectorData};

pub fn plugin(name: &str) -> PluginData {
    PluginData::new(name).expect("valid plugin name")
}

pub fn selector(id: &str, plugin_name: &str, sort: i32) -> SelectorData {
    SelectorData::new(id, plugin_name, sort).expect("valid selector keys")
}

pub fn rule(id: &str, selector_id: &str, sort: i32) -> RuleData {
    RuleData::new(id, selector_id, sort).expect("valid rule keys")
}

/// Assert a list is sorted by `sort` (ties by id) and ids are unique.
pub fn assert_ordered_unique<'a, I>(entries: I)
where
    I: IntoIterator<Item = (i32, &'a str)>,
{
    let entries: Vec<(i32, &str)> = entries.into_iter().collect();
    for pair in entries.windows(2) {
        assert!(pair[0] < pair[1], "out of order: {pair:?}");
    }
    let ids: HashSet<&str> = entries.iter().map(|(_, id)| *id).collect();
    assert_eq!(ids.len(), entries.len(), "duplicate ids in {entries:?}");
}
