//! Degree-based angle helpers.
//!
//! Angles are measured counter-clockwise from the positive X axis, in the
//! same frame as the field coordinates.

use nalgebra::{Point2, Vector2};

/// Offset of length `r` in direction `deg`.
#[inline]
pub fn polar_offset(r: f64, deg: f64) -> Vector2<f64> {
    let rad = deg.to_radians();
    Vector2::new(r * rad.cos(), r * rad.sin())
}

/// Direction from `from` to `to`, in degrees within (-180, 180].
///
/// Returns `0.0` when the points coincide (matches `atan2(0, 0)`).
#[inline]
pub fn bearing_deg(from: Point2<f64>, to: Point2<f64>) -> f64 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Wrap an unbounded angle into (-180, 180].
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Unsigned angle between two vectors, in degrees within [0, 180].
pub fn angle_between_deg(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    cross.atan2(a.dot(&b)).abs().to_degrees()
}
