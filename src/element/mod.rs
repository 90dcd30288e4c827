use egui::{Pos2, Rect, Vec2};

mod common;
pub(crate) mod circle;
pub(crate) mod image;
pub(crate) mod line;
mod property;
pub(crate) mod rectangle;
pub(crate) mod text;
mod transform;

pub use circle::Circle;
pub use common::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH, MIN_ELEMENT_SIZE, Style};
pub use image::Image;
pub use line::Line;
pub use property::{Geometry, Property, PropertyKind};
pub use rectangle::Rectangle;
pub use text::Text;
pub use transform::Transform;

use crate::error::ElementError;
use crate::geometry::hit_testing;
use crate::id_generator::ShapeId;
use common::ElementBase;

/// Common trait that all document elements must implement
pub trait Element {
    /// Get the identity handle of this element
    fn id(&self) -> ShapeId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Bounding rectangle in local coordinates
    fn local_rect(&self) -> Rect;

    /// Placement of the local coordinate space in the scene
    fn transform(&self) -> &Transform;

    /// Bounding rectangle in scene coordinates
    fn scene_rect(&self) -> Rect {
        self.transform().map_rect_to_scene(self.local_rect())
    }

    /// Test a point given in local coordinates.
    ///
    /// Shapes without a dedicated test fall back to bounding-box containment.
    fn hit_test_local(&self, point: Pos2, _tolerance: f32) -> bool {
        hit_testing::is_bounds_hit(self.local_rect(), point)
    }

    /// Test a point given in scene coordinates
    fn hit_test(&self, scene_point: Pos2, tolerance: f32) -> bool {
        self.hit_test_local(self.transform().map_from_scene(scene_point), tolerance)
    }

    /// Translate the element's placement by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Resize the element's local geometry to the new rectangle
    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError>;

    /// Whether the element is part of the current selection
    fn is_selected(&self) -> bool;
}

/// Enumeration of all element types in the document
#[derive(Debug, Clone)]
pub enum ElementType {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Text(Text),
    Image(Image),
}

impl ElementType {
    fn base(&self) -> &ElementBase {
        match self {
            ElementType::Rectangle(r) => &r.base,
            ElementType::Circle(c) => &c.base,
            ElementType::Line(l) => &l.base,
            ElementType::Text(t) => &t.base,
            ElementType::Image(i) => &i.base,
        }
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            ElementType::Rectangle(r) => &mut r.base,
            ElementType::Circle(c) => &mut c.base,
            ElementType::Line(l) => &mut l.base,
            ElementType::Text(t) => &mut t.base,
            ElementType::Image(i) => &mut i.base,
        }
    }

    /// Only the selection model writes this flag
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.base_mut().selected = selected;
    }

    pub fn style(&self) -> &Style {
        &self.base().style
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.base_mut().style = style;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.base_mut().transform = transform;
        self
    }

    /// Scene offset of the element's local origin
    pub fn position(&self) -> Vec2 {
        self.base().transform.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.base_mut().transform.position = position;
    }

    /// Snapshot of the local geometry
    pub fn geometry(&self) -> Geometry {
        match self {
            ElementType::Rectangle(r) => Geometry::Rectangle(r.rect()),
            ElementType::Circle(c) => Geometry::Circle {
                center: c.center(),
                radius: c.radius(),
            },
            ElementType::Line(l) => Geometry::Line {
                start: l.start(),
                end: l.end(),
            },
            ElementType::Text(t) => Geometry::Text {
                position: t.position(),
                font_size: t.font_size(),
            },
            ElementType::Image(i) => Geometry::Image(i.rect()),
        }
    }

    /// Restore a geometry snapshot taken from an element of the same kind
    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<(), ElementError> {
        match (self, geometry) {
            (ElementType::Rectangle(r), Geometry::Rectangle(rect)) => r.set_rect(rect),
            (ElementType::Circle(c), Geometry::Circle { center, radius }) => {
                c.set_shape(center, radius)
            }
            (ElementType::Line(l), Geometry::Line { start, end }) => l.set_points(start, end),
            (ElementType::Text(t), Geometry::Text { position, font_size }) => {
                t.set_layout(position, font_size)
            }
            (ElementType::Image(i), Geometry::Image(rect)) => i.set_rect(rect),
            (element, geometry) => {
                return Err(ElementError::GeometryMismatch {
                    geometry: geometry.name(),
                    element_type: element.element_type(),
                });
            }
        }
        Ok(())
    }

    fn supports(&self, kind: PropertyKind) -> bool {
        match kind {
            PropertyKind::StrokeColor
            | PropertyKind::StrokeWidth
            | PropertyKind::Rotation
            | PropertyKind::Scale => true,
            PropertyKind::Fill => matches!(self, ElementType::Rectangle(_) | ElementType::Circle(_)),
            PropertyKind::Text | PropertyKind::FontSize => matches!(self, ElementType::Text(_)),
        }
    }

    /// Current value of a property, or `None` if this element has no such property
    pub fn property(&self, kind: PropertyKind) -> Option<Property> {
        if !self.supports(kind) {
            return None;
        }
        let base = self.base();
        let value = match kind {
            PropertyKind::StrokeColor => Property::StrokeColor(base.style.stroke_color),
            PropertyKind::StrokeWidth => Property::StrokeWidth(base.style.stroke_width),
            PropertyKind::Fill => Property::Fill(base.style.fill),
            PropertyKind::Rotation => Property::Rotation(base.transform.rotation),
            PropertyKind::Scale => Property::Scale(base.transform.scale),
            PropertyKind::Text | PropertyKind::FontSize => match self {
                ElementType::Text(t) if kind == PropertyKind::Text => {
                    Property::Text(t.content().to_string())
                }
                ElementType::Text(t) => Property::FontSize(t.font_size()),
                _ => return None,
            },
        };
        Some(value)
    }

    pub fn set_property(&mut self, property: Property) -> Result<(), ElementError> {
        let kind = property.kind();
        if !self.supports(kind) {
            return Err(ElementError::UnsupportedProperty {
                property: kind.name(),
                element_type: self.element_type(),
            });
        }

        match (self, property) {
            (element, Property::StrokeColor(color)) => element.base_mut().style.stroke_color = color,
            (element, Property::StrokeWidth(width)) => {
                element.base_mut().style.stroke_width = width.max(0.0)
            }
            (element, Property::Fill(fill)) => element.base_mut().style.fill = fill,
            (element, Property::Rotation(rotation)) => {
                element.base_mut().transform.rotation = rotation
            }
            (element, Property::Scale(scale)) => element.base_mut().transform.scale = scale,
            (ElementType::Text(t), Property::Text(content)) => t.set_content(content),
            (ElementType::Text(t), Property::FontSize(size)) => {
                let position = t.position();
                t.set_layout(position, size)
            }
            // `supports` already rejected text properties on other kinds
            _ => {}
        }
        Ok(())
    }
}

impl Element for ElementType {
    fn id(&self) -> ShapeId {
        self.base().id
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Rectangle(_) => "rectangle",
            ElementType::Circle(_) => "circle",
            ElementType::Line(_) => "line",
            ElementType::Text(_) => "text",
            ElementType::Image(_) => "image",
        }
    }

    fn local_rect(&self) -> Rect {
        match self {
            ElementType::Rectangle(r) => r.local_rect(),
            ElementType::Circle(c) => c.local_rect(),
            ElementType::Line(l) => l.local_rect(),
            ElementType::Text(t) => t.local_rect(),
            ElementType::Image(i) => i.local_rect(),
        }
    }

    fn transform(&self) -> &Transform {
        &self.base().transform
    }

    fn hit_test_local(&self, point: Pos2, tolerance: f32) -> bool {
        match self {
            ElementType::Rectangle(r) => r.hit_test_local(point, tolerance),
            ElementType::Circle(c) => c.hit_test_local(point, tolerance),
            ElementType::Line(l) => l.hit_test_local(point, tolerance),
            ElementType::Text(t) => t.hit_test_local(point, tolerance),
            ElementType::Image(i) => i.hit_test_local(point, tolerance),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.base_mut().transform.position += delta;
    }

    fn resize(&mut self, new_rect: Rect) -> Result<(), ElementError> {
        match self {
            ElementType::Rectangle(r) => r.resize(new_rect),
            ElementType::Circle(c) => c.resize(new_rect),
            ElementType::Line(l) => l.resize(new_rect),
            ElementType::Text(t) => t.resize(new_rect),
            ElementType::Image(i) => i.resize(new_rect),
        }
    }

    fn is_selected(&self) -> bool {
        self.base().selected
    }
}

/// Factory functions for creating elements.
///
/// Every call allocates a fresh [`ShapeId`].
pub mod factory {
    use super::*;

    /// Create a new rectangle element
    pub fn create_rectangle(rect: Rect) -> ElementType {
        ElementType::Rectangle(Rectangle::new(rect))
    }

    /// Create a new circle element
    pub fn create_circle(center: Pos2, radius: f32) -> ElementType {
        ElementType::Circle(Circle::new(center, radius))
    }

    /// Create a new line element
    pub fn create_line(start: Pos2, end: Pos2) -> ElementType {
        ElementType::Line(Line::new(start, end))
    }

    /// Create a new text element anchored at its baseline-left point
    pub fn create_text(position: Pos2, content: impl Into<String>, font_size: f32) -> ElementType {
        ElementType::Text(Text::new(position, content, font_size))
    }

    /// Create a new image element
    pub fn create_image(rect: Rect, source: impl Into<String>) -> ElementType {
        ElementType::Image(Image::new(rect, source))
    }
}
