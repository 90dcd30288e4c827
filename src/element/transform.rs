use egui::{Pos2, Rect, Vec2};

/// Scene placement of a shape: local coordinates are scaled, then rotated
/// about the local origin, then offset by `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset of the local origin in scene coordinates
    pub position: Vec2,
    /// Scale factor (1.0 = original size)
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        const DEFAULT_TRANSFORM: Transform = Transform {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        };
        DEFAULT_TRANSFORM
    }
}

impl Transform {
    /// Creates a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Identity transform offset by `position`
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Maps a point from local to scene coordinates
    pub fn map_to_scene(&self, local: Pos2) -> Pos2 {
        let (sin, cos) = self.rotation.sin_cos();
        let x = local.x * self.scale.x;
        let y = local.y * self.scale.y;
        Pos2::new(
            cos * x - sin * y + self.position.x,
            sin * x + cos * y + self.position.y,
        )
    }

    /// Maps a point from scene to local coordinates.
    ///
    /// A zero scale component collapses that axis to 0 instead of dividing by zero.
    pub fn map_from_scene(&self, scene: Pos2) -> Pos2 {
        let (sin, cos) = self.rotation.sin_cos();
        let dx = scene.x - self.position.x;
        let dy = scene.y - self.position.y;
        let x = cos * dx + sin * dy;
        let y = -sin * dx + cos * dy;
        Pos2::new(unscale(x, self.scale.x), unscale(y, self.scale.y))
    }

    /// Axis-aligned scene bounds of a local rectangle
    pub fn map_rect_to_scene(&self, local: Rect) -> Rect {
        if !local.is_finite() {
            return local;
        }
        let corners = [
            self.map_to_scene(local.left_top()),
            self.map_to_scene(local.right_top()),
            self.map_to_scene(local.left_bottom()),
            self.map_to_scene(local.right_bottom()),
        ];
        Rect::from_points(&corners)
    }
}

fn unscale(value: f32, scale: f32) -> f32 {
    if scale.abs() <= f32::EPSILON {
        0.0
    } else {
        value / scale
    }
}
