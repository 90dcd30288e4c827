use egui::{Color32, Pos2, Rect};

use super::Transform;
use crate::error::ElementError;
use crate::id_generator::{ShapeId, generate_id};

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 2.0;
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Outline and fill styling shared by every shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub fill: Option<Color32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_color: Color32::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: None,
        }
    }
}

/// State every shape carries besides its local geometry
#[derive(Debug, Clone)]
pub(crate) struct ElementBase {
    pub(crate) id: ShapeId,
    pub(crate) transform: Transform,
    pub(crate) style: Style,
    pub(crate) selected: bool,
}

impl ElementBase {
    pub(crate) fn new() -> Self {
        Self {
            id: generate_id(),
            transform: Transform::default(),
            style: Style::default(),
            selected: false,
        }
    }
}

/// Validates that a rectangle has minimum dimensions
pub(crate) fn validate_rect(rect: &Rect) -> Result<(), ElementError> {
    if rect.width() < MIN_ELEMENT_SIZE || rect.height() < MIN_ELEMENT_SIZE {
        Err(ElementError::TooSmall {
            min: MIN_ELEMENT_SIZE,
            width: rect.width(),
            height: rect.height(),
        })
    } else {
        Ok(())
    }
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    Rect::from_points(points).expand(padding)
}
