//! Rule record.

use serde::{Deserialize, Serialize};

use crate::model::condition::{ConditionData, MatchMode};
use crate::model::error::RecordError;
use crate::model::key::{PluginName, RuleId, SelectorId};
use crate::store::OrderedRecord;

/// The finest-grained routing decision, owned by one selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleData {
    pub id: RuleId,
    pub selector_id: SelectorId,
    #[serde(default)]
    pub plugin_name: Option<PluginName>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub sort: i32,
    #[serde(default = "crate::model::default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub logged: bool,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionData>,
}

impl RuleData {
    /// Create an enabled rule with an empty payload.
    pub fn new(
        id: impl Into<String>,
        selector_id: impl Into<String>,
        sort: i32,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            id: RuleId::new(id)?,
            selector_id: SelectorId::new(selector_id)?,
            plugin_name: None,
            name: String::new(),
            match_mode: MatchMode::default(),
            sort,
            enabled: true,
            logged: false,
            handle: None,
            conditions: Vec::new(),
        })
    }

    pub fn with_plugin(mut self, plugin_name: PluginName) -> Self {
        self.plugin_name = Some(plugin_name);
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

impl OrderedRecord for RuleData {
    type Group = SelectorId;
    type Id = RuleId;

    fn group(&self) -> &SelectorId {
        &self.selector_id
    }

    fn id(&self) -> &RuleId {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort
    }
}
