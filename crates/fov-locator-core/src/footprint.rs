//! Ground polygons derived from a frustum, for renderers.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::angle::polar_offset;
use crate::frustum::{Edge, ViewFrustum};

/// How far the edge rays are extended past the targets for the beyond-range polygon.
pub const FAR_RANGE: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrustumFootprint {
    /// Origin plus the two near corners: the ground hidden below the camera.
    pub blind_zone: [Point2<f64>; 3],
    /// Near A, near B, edge B, edge A.
    pub visible: [Point2<f64>; 4],
    /// Edge B, far B, far A, edge A.
    pub beyond: [Point2<f64>; 4],
}

impl ViewFrustum {
    pub fn footprint(&self) -> FrustumFootprint {
        let origin = self.origin();
        let gaze = self.gaze_deg();
        let half = self.camera().half_fov_deg();
        let near = self.distance_to_visible_ground();

        let near_a = origin + polar_offset(near, gaze - half);
        let near_b = origin + polar_offset(near, gaze + half);
        let far_a = origin + polar_offset(FAR_RANGE, gaze - half);
        let far_b = origin + polar_offset(FAR_RANGE, gaze + half);
        let edge_a = self.edge_target(Edge::A);
        let edge_b = self.edge_target(Edge::B);

        FrustumFootprint {
            blind_zone: [origin, near_a, near_b],
            visible: [near_a, near_b, edge_b, edge_a],
            beyond: [edge_b, far_b, far_a, edge_a],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraProfile;
    use approx::assert_abs_diff_eq;

    #[test]
    fn footprint_corners_lie_on_edge_rays() {
        let f = ViewFrustum::new(Point2::new(300.0, 400.0), CameraProfile::Nao.model());
        let fp = f.footprint();
        let near = f.distance_to_visible_ground();

        assert_eq!(fp.blind_zone[0], f.origin());
        assert_abs_diff_eq!((fp.blind_zone[1] - f.origin()).norm(), near, epsilon = 1e-9);
        assert_abs_diff_eq!((fp.beyond[1] - f.origin()).norm(), FAR_RANGE, epsilon = 1e-9);

        // Near A, edge A and far A are collinear with the origin.
        let dir_a = (f.edge_target(Edge::A) - f.origin()).normalize();
        let near_dir = (fp.visible[0] - f.origin()).normalize();
        let far_dir = (fp.beyond[2] - f.origin()).normalize();
        assert_abs_diff_eq!((dir_a - near_dir).norm(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((dir_a - far_dir).norm(), 0.0, epsilon = 1e-9);
    }
}
