//! Sync event definitions and JSON-lines parsing.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{PluginData, RuleData, SelectorData};

/// What the control plane did to the records in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Create,
    Update,
    Delete,
    /// The records are the complete set for the group.
    Refresh,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Create => "create",
            EventAction::Update => "update",
            EventAction::Delete => "delete",
            EventAction::Refresh => "refresh",
        }
    }
}

/// A batch of records of one kind pushed by the control plane.
///
/// Wire form: `{"group": "selector", "action": "create", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "lowercase")]
pub enum DataEvent {
    Plugin {
        action: EventAction,
        data: Vec<PluginData>,
    },
    Selector {
        action: EventAction,
        data: Vec<SelectorData>,
    },
    Rule {
        action: EventAction,
        data: Vec<RuleData>,
    },
}

impl DataEvent {
    pub fn group(&self) -> &'static str {
        match self {
            DataEvent::Plugin { .. } => "plugin",
            DataEvent::Selector { .. } => "selector",
            DataEvent::Rule { .. } => "rule",
        }
    }

    pub fn action(&self) -> EventAction {
        match self {
            DataEvent::Plugin { action, .. }
            | DataEvent::Selector { action, .. }
            | DataEvent::Rule { action, .. } => *action,
        }
    }

    /// Number of records carried.
    pub fn len(&self) -> usize {
        match self {
            DataEvent::Plugin { data, .. } => data.len(),
            DataEvent::Selector { data, .. } => data.len(),
            DataEvent::Rule { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors reading an event stream.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse one event per line. Blank lines are skipped; line numbers in
/// errors are 1-based.
pub fn read_event_stream<R: BufRead>(reader: R) -> Result<Vec<DataEvent>, SyncError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| SyncError::Parse {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}
