use egui::{Pos2, Rect};

use super::common::{self, ElementBase, MIN_ELEMENT_SIZE};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// Straight segment between two local points
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) base: ElementBase,
    start: Pos2,
    end: Pos2,
}

impl Line {
    pub(crate) fn new(start: Pos2, end: Pos2) -> Self {
        Self {
            base: ElementBase::new(),
            start,
            end,
        }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub(crate) fn local_rect(&self) -> Rect {
        common::calculate_bounds(&[self.start, self.end], self.base.style.stroke_width / 2.0)
    }

    pub(crate) fn hit_test_local(&self, point: Pos2, tolerance: f32) -> bool {
        hit_testing::is_line_hit(self.start, self.end, point, tolerance)
    }

    /// Rescales both endpoints from their current bounds into `new_rect`.
    ///
    /// Axis-aligned lines have a flat bounding box, so only the longer side
    /// of `new_rect` has to meet the minimum size.
    pub(crate) fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        if new_rect.width().max(new_rect.height()) < MIN_ELEMENT_SIZE {
            return Err(ElementError::TooSmall {
                min: MIN_ELEMENT_SIZE,
                width: new_rect.width(),
                height: new_rect.height(),
            });
        }

        let old_rect = Rect::from_two_pos(self.start, self.end);
        let remap = |point: Pos2| {
            let rel_x = if old_rect.width() > 0.0 {
                (point.x - old_rect.min.x) / old_rect.width()
            } else {
                0.0
            };
            let rel_y = if old_rect.height() > 0.0 {
                (point.y - old_rect.min.y) / old_rect.height()
            } else {
                0.0
            };
            Pos2::new(
                new_rect.min.x + rel_x * new_rect.width(),
                new_rect.min.y + rel_y * new_rect.height(),
            )
        };

        self.start = remap(self.start);
        self.end = remap(self.end);
        Ok(())
    }

    pub(crate) fn set_points(&mut self, start: Pos2, end: Pos2) {
        self.start = start;
        self.end = end;
    }
}
