use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::hit_testing::HIT_TOLERANCE;

/// Tunables for one editor instance.
///
/// Missing fields fall back to their defaults, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct EditorConfig {
    /// Maximum number of entries kept on the undo stack
    pub max_history: usize,
    /// Maximum number of selection snapshots kept for selection undo/redo
    pub max_selection_history: usize,
    /// Distance within which an edge counts as hit
    pub hit_tolerance: f32,
    /// Padding around the aggregate bounds of a multi-selection
    pub selection_indicator_padding: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: 50,
            max_selection_history: 20,
            hit_tolerance: HIT_TOLERANCE,
            selection_indicator_padding: 5.0,
        }
    }
}

impl EditorConfig {
    /// Parse a config from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a config from a JSON file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(self) -> Self {
        Self {
            max_history: self.max_history.max(1),
            max_selection_history: self.max_selection_history.max(1),
            hit_tolerance: if self.hit_tolerance.is_finite() {
                self.hit_tolerance.max(0.0)
            } else {
                HIT_TOLERANCE
            },
            selection_indicator_padding: if self.selection_indicator_padding.is_finite() {
                self.selection_indicator_padding.max(0.0)
            } else {
                0.0
            },
        }
    }
}
