use egui::{Pos2, Rect};

use super::common::{self, ElementBase};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// Placed raster image. Pixel data is owned by the renderer; the core keeps
/// only the source reference and the placement rectangle.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) base: ElementBase,
    rect: Rect,
    source: String,
}

impl Image {
    pub(crate) fn new(rect: Rect, source: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(),
            rect: Rect::from_two_pos(rect.min, rect.max),
            source: source.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn local_rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn hit_test_local(&self, point: Pos2, _tolerance: f32) -> bool {
        hit_testing::is_image_hit(self.rect, point)
    }

    pub(crate) fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        common::validate_rect(&new_rect)?;
        self.rect = new_rect;
        Ok(())
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}
