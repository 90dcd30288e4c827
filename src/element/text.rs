use egui::{Pos2, Rect, Vec2};

use super::common::{self, ElementBase, MIN_ELEMENT_SIZE};
use crate::error::ElementError;
use crate::geometry::hit_testing;

/// Average glyph advance as a fraction of the font size.
///
/// Real font metrics belong to the renderer; the core only needs a stable box.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Single-line text anchored at its baseline-left point
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) base: ElementBase,
    position: Pos2,
    content: String,
    font_size: f32,
}

impl Text {
    pub(crate) fn new(position: Pos2, content: impl Into<String>, font_size: f32) -> Self {
        Self {
            base: ElementBase::new(),
            position,
            content: content.into(),
            font_size: font_size.max(MIN_ELEMENT_SIZE),
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Box spanning one line of text above the baseline
    pub fn text_rect(&self) -> Rect {
        let width = self.content.chars().count() as f32 * self.font_size * GLYPH_WIDTH_RATIO;
        Rect::from_min_size(
            Pos2::new(self.position.x, self.position.y - self.font_size),
            Vec2::new(width, self.font_size),
        )
    }

    pub(crate) fn local_rect(&self) -> Rect {
        self.text_rect()
    }

    pub(crate) fn hit_test_local(&self, point: Pos2, _tolerance: f32) -> bool {
        hit_testing::is_text_hit(self.text_rect(), point)
    }

    /// Text scales through its font size; the box height becomes the new size
    pub(crate) fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        common::validate_rect(&new_rect)?;
        self.position = new_rect.left_bottom();
        self.font_size = new_rect.height();
        Ok(())
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn set_layout(&mut self, position: Pos2, font_size: f32) {
        self.position = position;
        self.font_size = font_size.max(MIN_ELEMENT_SIZE);
    }
}
