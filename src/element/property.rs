use egui::{Color32, Pos2, Rect, Vec2};

/// An editable attribute value, as shown in a property panel
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    StrokeColor(Color32),
    StrokeWidth(f32),
    Fill(Option<Color32>),
    Text(String),
    FontSize(f32),
    Rotation(f32),
    Scale(Vec2),
}

/// Which attribute a [`Property`] addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    StrokeColor,
    StrokeWidth,
    Fill,
    Text,
    FontSize,
    Rotation,
    Scale,
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::StrokeColor(_) => PropertyKind::StrokeColor,
            Property::StrokeWidth(_) => PropertyKind::StrokeWidth,
            Property::Fill(_) => PropertyKind::Fill,
            Property::Text(_) => PropertyKind::Text,
            Property::FontSize(_) => PropertyKind::FontSize,
            Property::Rotation(_) => PropertyKind::Rotation,
            Property::Scale(_) => PropertyKind::Scale,
        }
    }
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::StrokeColor => "stroke_color",
            PropertyKind::StrokeWidth => "stroke_width",
            PropertyKind::Fill => "fill",
            PropertyKind::Text => "text",
            PropertyKind::FontSize => "font_size",
            PropertyKind::Rotation => "rotation",
            PropertyKind::Scale => "scale",
        }
    }
}

/// Snapshot of a shape's local geometry, used to make resizes exactly reversible
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rectangle(Rect),
    Circle { center: Pos2, radius: f32 },
    Line { start: Pos2, end: Pos2 },
    Text { position: Pos2, font_size: f32 },
    Image(Rect),
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Rectangle(_) => "rectangle",
            Geometry::Circle { .. } => "circle",
            Geometry::Line { .. } => "line",
            Geometry::Text { .. } => "text",
            Geometry::Image(_) => "image",
        }
    }
}
