//! Match conditions shared by selectors and rules.

use serde::{Deserialize, Serialize};

/// How a list of conditions is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every condition must match.
    #[default]
    And,
    /// Any condition may match.
    Or,
}

/// Whether a selector applies to all traffic or only to matching requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Full,
    #[default]
    Custom,
}

/// A single request predicate, e.g. `header[x-env] = staging`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    /// Where the parameter comes from (header, uri, query, ...).
    pub param_type: String,
    /// Comparison operator (`=`, `match`, `like`, ...).
    pub operator: String,
    pub param_name: String,
    pub param_value: String,
}

impl ConditionData {
    pub fn new(
        param_type: impl Into<String>,
        operator: impl Into<String>,
        param_name: impl Into<String>,
        param_value: impl Into<String>,
    ) -> Self {
        Self {
            param_type: param_type.into(),
            operator: operator.into(),
            param_name: param_name.into(),
            param_value: param_value.into(),
        }
    }
}
