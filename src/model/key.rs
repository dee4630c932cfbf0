//! Strongly typed record keys.
//!
//! Each key wraps a non-empty `String`. Deserialization goes through
//! `TryFrom<String>` so an empty key is rejected at the record boundary
//! instead of surfacing later inside a store.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::error::RecordError;

macro_rules! record_key {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Build a key, rejecting empty or blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, RecordError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(RecordError::EmptyKey($label));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = RecordError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = RecordError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        // Hash/Eq of the newtype match `str`, so maps keyed by it can be
        // queried with a plain `&str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_key!(
    /// Name of a plugin; keys the plugin and selector stores.
    PluginName,
    "plugin name"
);

record_key!(
    /// Selector identifier; unique within a plugin and keys the rule store.
    SelectorId,
    "selector id"
);

record_key!(
    /// Rule identifier; unique within a selector.
    RuleId,
    "rule id"
);
