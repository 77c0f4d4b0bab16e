//! Chart angle conventions.
//!
//! Chart angles are radians measured clockwise from 12 o'clock, with the
//! screen y axis pointing down. This matches the arc geometry consumed by
//! SVG-style rendering surfaces.

use super::Vec2;

/// Converts a chart angle and radius to a point relative to the chart center.
pub fn polar_to_cartesian(angle: f64, radius: f64) -> Vec2 {
    Vec2::new(radius * angle.sin(), -radius * angle.cos())
}

/// Inverse of [`polar_to_cartesian`]. Returns `(angle, radius)` with the angle
/// in `(-PI, PI]`.
pub fn cartesian_to_polar(point: Vec2) -> (f64, f64) {
    (point.x.atan2(-point.y), point.length())
}

pub fn midpoint_angle(start: f64, end: f64) -> f64 {
    (start + end) / 2.0
}
