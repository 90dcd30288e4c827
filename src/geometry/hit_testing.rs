//! Point-to-shape proximity tests.
//!
//! Every function here is pure: it takes a shape's *local* geometry and a
//! candidate point in the same coordinate space. Thin outlines (lines, circle
//! rims, rectangle borders) are tested against a tolerance band so they stay
//! selectable; text and images are solid and use plain containment.

use egui::{Pos2, Rect};

use crate::element::Element;
use crate::id_generator::ShapeId;

/// Default distance within which an outline counts as hit
pub const HIT_TOLERANCE: f32 = 2.0;

/// Distance from a point to a line segment.
///
/// The projection onto the segment is clamped to its extent, so points beyond
/// either end measure to the nearest endpoint. A zero-length segment is a point.
pub fn point_to_segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line_vec = end - start;
    let point_vec = point - start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / line_len).clamp(0.0, line_len);
    let projection = start + line_vec * (t / line_len);
    (point - projection).length()
}

/// Distance from a point to the nearest edge of a rectangle
pub fn point_to_rect_edge_distance(point: Pos2, rect: Rect) -> f32 {
    if rect.contains(point) {
        let dist_left = point.x - rect.min.x;
        let dist_right = rect.max.x - point.x;
        let dist_top = point.y - rect.min.y;
        let dist_bottom = rect.max.y - point.y;
        return dist_left.min(dist_right).min(dist_top).min(dist_bottom);
    }

    // Outside the infinite edge lines the per-axis delta is wrong; measure to
    // the actual edge segments instead.
    let edges = [
        (rect.left_top(), rect.right_top()),
        (rect.right_top(), rect.right_bottom()),
        (rect.left_bottom(), rect.right_bottom()),
        (rect.left_top(), rect.left_bottom()),
    ];
    edges
        .iter()
        .map(|(a, b)| point_to_segment_distance(point, *a, *b))
        .fold(f32::INFINITY, f32::min)
}

/// Distance from a point to the rim of a circle
pub fn point_to_circle_edge_distance(point: Pos2, center: Pos2, radius: f32) -> f32 {
    (point.distance(center) - radius).abs()
}

pub fn is_line_hit(start: Pos2, end: Pos2, point: Pos2, tolerance: f32) -> bool {
    point_to_segment_distance(point, start, end) <= tolerance
}

/// Edge-only: the interior of the rectangle is a miss
pub fn is_rectangle_hit(rect: Rect, point: Pos2, tolerance: f32) -> bool {
    point_to_rect_edge_distance(point, rect) <= tolerance
}

/// Edge-only: the interior of the circle is a miss
pub fn is_circle_hit(center: Pos2, radius: f32, point: Pos2, tolerance: f32) -> bool {
    point_to_circle_edge_distance(point, center, radius) <= tolerance
}

pub fn is_text_hit(text_rect: Rect, point: Pos2) -> bool {
    text_rect.contains(point)
}

pub fn is_image_hit(image_rect: Rect, point: Pos2) -> bool {
    image_rect.contains(point)
}

/// Fallback for shapes without a dedicated test
pub fn is_bounds_hit(bounds: Rect, point: Pos2) -> bool {
    bounds.contains(point)
}

/// Whether a query rectangle is small enough to be treated as a click
pub fn is_click_sized(rect: Rect, tolerance: f32) -> bool {
    let limit = (tolerance * 2.0).max(f32::EPSILON);
    rect.width() < limit && rect.height() < limit
}

/// Shapes touched by a scene-space query rectangle, topmost first.
///
/// `elements` is ordered bottom to top. Every shape whose scene bounds
/// intersect `rect` is returned. A click-sized query additionally appends the
/// shapes hit exactly at the rectangle's center that the bounds pass missed.
pub fn elements_in_rect<E: Element>(elements: &[E], rect: Rect, tolerance: f32) -> Vec<ShapeId> {
    let rect = Rect::from_two_pos(rect.min, rect.max);

    let mut found: Vec<ShapeId> = elements
        .iter()
        .rev()
        .filter(|element| element.scene_rect().intersects(rect))
        .map(|element| element.id())
        .collect();

    if is_click_sized(rect, tolerance) {
        let center = rect.center();
        for element in elements.iter().rev() {
            let id = element.id();
            if !found.contains(&id) && element.hit_test(center, tolerance) {
                found.push(id);
            }
        }
    }

    found
}

/// Topmost shape whose exact geometry is hit at `point`
pub fn element_at_point<E: Element>(elements: &[E], point: Pos2, tolerance: f32) -> Option<ShapeId> {
    elements
        .iter()
        .rev()
        .find(|element| element.hit_test(point, tolerance))
        .map(|element| element.id())
}
