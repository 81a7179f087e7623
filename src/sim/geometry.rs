//! Geometry primitives shared by every collision test
//!
//! All entities collide as circles or points; there is no polygon geometry.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// True if `point` lies strictly inside the circle.
///
/// A point exactly on the boundary does not count as a hit.
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    distance(center, point) < radius
}

/// True if `point` is strictly inside the `width` x `height` world rectangle
#[inline]
pub fn in_bounds_open(point: Vec2, width: f32, height: f32) -> bool {
    point.x > 0.0 && point.x < width && point.y > 0.0 && point.y < height
}

/// True if `point` has left the closed `width` x `height` world rectangle
#[inline]
pub fn out_of_bounds(point: Vec2, width: f32, height: f32) -> bool {
    point.x < 0.0 || point.x > width || point.y < 0.0 || point.y > height
}

/// Clamp a circle's center so the whole circle stays inside the world
#[inline]
pub fn clamp_inside(point: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        point.x.clamp(radius, width - radius),
        point.y.clamp(radius, height - radius),
    )
}

/// Closest of `points` to `from`, if any
pub fn nearest(from: Vec2, points: impl IntoIterator<Item = Vec2>) -> Option<Vec2> {
    points.into_iter().min_by(|a, b| {
        a.distance_squared(from)
            .partial_cmp(&b.distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
