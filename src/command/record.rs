use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ActionKind;
use crate::error::HistoryError;

/// Descriptive, display-only form of an action. The undo/redo behaviour is not
/// part of it and cannot be rebuilt from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
    pub timestamp: f64,
    pub metadata: BTreeMap<String, String>,
    /// Children, present only for action groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionRecord>>,
}

/// Structural snapshot of both history stacks, oldest entry first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Version of the application when the snapshot was taken
    pub version: String,
    /// Seconds since the UNIX epoch when the snapshot was taken
    pub timestamp: f64,
    pub max_history: usize,
    pub undo_stack: Vec<ActionRecord>,
    pub redo_stack: Vec<ActionRecord>,
}

impl HistorySnapshot {
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One row of the history panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub kind: ActionKind,
    pub description: String,
    pub timestamp: f64,
    /// Entry lives on the undo stack
    pub can_undo: bool,
    /// Entry lives on the redo stack
    pub can_redo: bool,
}
