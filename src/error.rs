use thiserror::Error;

use crate::id_generator::ShapeId;

/// Errors raised by shape-level edits
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Element dimensions too small (min: {min}). Width: {width}, Height: {height}")]
    TooSmall { min: f32, width: f32, height: f32 },

    #[error("Property {property} is not supported by {element_type} elements")]
    UnsupportedProperty {
        property: &'static str,
        element_type: &'static str,
    },

    #[error("Cannot apply {geometry} geometry to a {element_type} element")]
    GeometryMismatch {
        geometry: &'static str,
        element_type: &'static str,
    },

    #[error("Element {0} not found")]
    NotFound(ShapeId),
}

/// Errors that can occur while exporting the history log
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur while loading editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),
}
