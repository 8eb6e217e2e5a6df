//! Relative bearing of a field object, with bounds from position uncertainty.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::angle::{bearing_deg, normalize_deg, polar_offset};
use crate::frustum::ViewFrustum;

/// Angle of an object relative to the gaze direction, in degrees.
///
/// Positive values mean the object is clockwise of the gaze.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BearingBounds {
    /// Seen from the frustum origin.
    pub nominal_deg: f64,
    /// Smallest value seen from either lateral extreme of the uncertainty circle.
    ///
    /// `min_deg <= nominal_deg <= max_deg` always holds, so for objects
    /// behind the camera the bounds may reach past ±180.
    pub min_deg: f64,
    pub max_deg: f64,
}

impl ViewFrustum {
    /// Bearing of `object` relative to the gaze, assuming the camera may
    /// actually sit up to `lateral_radius` to either side of the origin.
    ///
    /// From each lateral extreme the bearing is measured against the
    /// direction toward the primary target, which is what the annotator
    /// fixed by placing the gaze.
    pub fn bearing_bounds(&self, object: Point2<f64>, lateral_radius: f64) -> BearingBounds {
        let origin = self.origin();
        let gaze = self.gaze_deg();
        let primary = self.primary_target();

        let nominal = normalize_deg(gaze - bearing_deg(origin, object));

        // Offsets from nominal, so the interval never wraps through 180.
        let offset_from = |side_deg: f64| {
            let p = origin + polar_offset(lateral_radius, gaze + side_deg);
            normalize_deg(bearing_deg(p, primary) - bearing_deg(p, object) - nominal)
        };
        let right = offset_from(-90.0);
        let left = offset_from(90.0);

        BearingBounds {
            nominal_deg: nominal,
            min_deg: nominal + right.min(left),
            max_deg: nominal + right.max(left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraProfile;
    use approx::assert_abs_diff_eq;

    fn looking_east() -> ViewFrustum {
        let mut f = ViewFrustum::new(Point2::new(0.0, 0.0), CameraProfile::Nao.model());
        f.look_at(Point2::new(100.0, 0.0));
        f
    }

    #[test]
    fn object_on_gaze_ray_has_zero_nominal_and_symmetric_bounds() {
        let f = looking_east();
        let b = f.bearing_bounds(Point2::new(50.0, 0.0), 10.0);
        assert_abs_diff_eq!(b.nominal_deg, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.min_deg, -b.max_deg, epsilon = 1e-9);
        assert!(b.max_deg > 0.0);
    }

    #[test]
    fn zero_radius_collapses_bounds_onto_nominal() {
        let f = looking_east();
        let object = Point2::new(80.0, -30.0);
        let b = f.bearing_bounds(object, 0.0);
        assert_abs_diff_eq!(b.min_deg, b.nominal_deg, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max_deg, b.nominal_deg, epsilon = 1e-9);
        assert!(b.nominal_deg > 0.0);
    }

    #[test]
    fn nominal_lies_within_bounds() {
        let f = looking_east();
        let b = f.bearing_bounds(Point2::new(60.0, 25.0), 15.0);
        assert!(b.min_deg <= b.nominal_deg && b.nominal_deg <= b.max_deg);
    }

    #[test]
    fn bounds_behind_the_camera_do_not_wrap() {
        let f = looking_east();
        let b = f.bearing_bounds(Point2::new(-100.0, 1.0), 10.0);
        assert!(b.nominal_deg < -179.0);
        assert!(
            b.min_deg <= b.nominal_deg && b.nominal_deg <= b.max_deg,
            "{b:?}"
        );
        assert!(b.max_deg - b.min_deg < 30.0, "{b:?}");
        assert!(b.min_deg < -180.0, "{b:?}");
    }
}
