use egui::{Pos2, Rect};

use super::common::{self, ElementBase};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// Axis-aligned rectangle outline in local coordinates
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) base: ElementBase,
    rect: Rect,
}

impl Rectangle {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(),
            rect: Rect::from_two_pos(rect.min, rect.max),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn local_rect(&self) -> Rect {
        self.rect.expand(self.base.style.stroke_width / 2.0)
    }

    pub(crate) fn hit_test_local(&self, point: Pos2, tolerance: f32) -> bool {
        hit_testing::is_rectangle_hit(self.rect, point, tolerance)
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
