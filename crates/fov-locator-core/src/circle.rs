//! Two-circle intersection, the workhorse of the inverse frustum solve.

use nalgebra::{Point2, Vector2};

/// Reasons an intersection (and therefore an inverse solve) has no answer.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SolveError {
    #[error("circles are disjoint (center distance {distance:.3} > radius sum {radius_sum:.3})")]
    Disjoint { distance: f64, radius_sum: f64 },
    #[error(
        "one circle lies inside the other (center distance {distance:.3} < radius difference {radius_diff:.3})"
    )]
    Contained { distance: f64, radius_diff: f64 },
    #[error("circles coincide; intersection is not unique")]
    Coincident,
}

/// Intersect the circle `(c0, r0)` with the circle `(c1, r1)`.
///
/// Returns both intersection points; they are equal when the circles are
/// tangent. The first point is on the left of the directed line `c0 -> c1`
/// (counter-clockwise side), the second on the right.
pub fn circle_intersection(
    c0: Point2<f64>,
    r0: f64,
    c1: Point2<f64>,
    r1: f64,
) -> Result<[Point2<f64>; 2], SolveError> {
    let delta: Vector2<f64> = c1 - c0;
    let d = delta.norm();

    if d > r0 + r1 {
        return Err(SolveError::Disjoint {
            distance: d,
            radius_sum: r0 + r1,
        });
    }
    if d < (r0 - r1).abs() {
        return Err(SolveError::Contained {
            distance: d,
            radius_diff: (r0 - r1).abs(),
        });
    }
    // Concentric with equal radii: every point (or none) is shared.
    if d == 0.0 {
        return Err(SolveError::Coincident);
    }

    // Distance from c0 to the radical line along c0 -> c1.
    let a = (r0 * r0 - r1 * r1 + d * d) / (2.0 * d);
    let mid = c0 + delta * (a / d);

    // Tangent circles can round r0^2 - a^2 slightly below zero.
    let h = (r0 * r0 - a * a).max(0.0).sqrt();
    let offset = Vector2::new(-delta.y, delta.x) * (h / d);

    Ok([mid + offset, mid - offset])
}
