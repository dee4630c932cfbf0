//! Selector record.

use serde::{Deserialize, Serialize};

use crate::model::condition::{ConditionData, MatchMode, SelectorType};
use crate::model::error::RecordError;
use crate::model::key::{PluginName, SelectorId};
use crate::store::OrderedRecord;

/// A rule-grouping construct owned by one plugin.
///
/// Selectors of a plugin are evaluated in ascending `sort` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorData {
    pub id: SelectorId,
    pub plugin_name: PluginName,
    #[serde(default)]
    pub plugin_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default, rename = "type")]
    pub selector_type: SelectorType,
    #[serde(default)]
    pub sort: i32,
    #[serde(default = "crate::model::default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub logged: bool,
    /// Continue to the next selector after this one matched.
    #[serde(default = "crate::model::default_true")]
    pub continued: bool,
    /// Opaque handler payload interpreted by the owning plugin.
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionData>,
}

impl SelectorData {
    /// Create an enabled selector with an empty payload.
    pub fn new(
        id: impl Into<String>,
        plugin_name: impl Into<String>,
        sort: i32,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: SelectorId::new(id)?,
            plugin_name: PluginName::new(plugin_name)?,
            plugin_id: None,
            name: String::new(),
            match_mode: MatchMode::default(),
            selector_type: SelectorType::default(),
            sort,
            enabled: true,
            logged: false,
            continued: true,
            handle: None,
            conditions: Vec::new(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_condition(mut self, condition: ConditionData) -> Self {
        self.conditions.push(condition);
        self
    }
}

impl OrderedRecord for SelectorData {
    type Group = PluginName;
    type Id = SelectorId;

    fn group(&self) -> &PluginName {
        &self.plugin_name
    }

    fn id(&self) -> &SelectorId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort
    }
}
