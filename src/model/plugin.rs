//! Plugin configuration record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::error::RecordError;
use crate::model::key::PluginName;
use crate::store::SingletonRecord;

/// Configuration of one gateway plugin, keyed by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginData {
    /// Control-plane identifier (informational, not a cache key).
    #[serde(default)]
    pub id: String,
    pub name: PluginName,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "crate::model::default_true")]
    pub enabled: bool,
    /// Plugin specific settings, passed through untouched.
    #[serde(default)]
    pub config: Value,
}

impl PluginData {
    /// Create an enabled plugin with no configuration.
    pub fn new(name: impl Into<String>) -> Result<Self, RecordError> {
        Ok(Self {
            id: String::new(),
            name: PluginName::new(name)?,
            role: None,
            enabled: true,
            config: Value::Null,
        })
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl SingletonRecord for PluginData {
    type Key = PluginName;

    fn key(&self) -> &PluginName {
        &self.name
    }
}
