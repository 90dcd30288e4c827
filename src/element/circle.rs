use egui::{Pos2, Rect, Vec2};

use super::common::{self, ElementBase};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// Circle outline given by center and radius
#[derive(Debug, Clone)]
pub struct Circle {
    pub(crate) base: ElementBase,
    center: Pos2,
    radius: f32,
}

impl Circle {
    pub(crate) fn new(center: Pos2, radius: f32) -> Self {
        Self {
            base: ElementBase::new(),
            center,
            radius: radius.abs(),
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub(crate) fn local_rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.radius * 2.0))
            .expand(self.base.style.stroke_width / 2.0)
    }

    pub(crate) fn hit_test_local(&self, point: Pos2, tolerance: f32) -> bool {
        hit_testing::is_circle_hit(self.center, self.radius, point, tolerance)
    }

    /// Fits the largest circle into `new_rect`, centered
    pub(crate) fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        common::validate_rect(&new_rect)?;
        self.center = new_rect.center();
        self.radius = new_rect.width().min(new_rect.height()) / 2.0;
        Ok(())
    }

    pub(crate) fn set_shape(&mut self, center: Pos2, radius: f32) {
        self.center = center;
        self.radius = radius.abs();
    }
}
