use serde::{Deserialize, Serialize};

use crate::camera::CameraProfile;
use crate::frustum::TARGET_PICK_RADIUS;

pub const DEFAULT_RADIUS: f64 = 25.0;
pub const MINIMUM_RADIUS: f64 = 5.0;
/// Distance from the circle's rim within which a pointer counts as "on the edge".
pub const EDGE_TOLERANCE_PX: f64 = 3.0;

/// Configuration for an [`crate::UncertaintyRegion`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionParams {
    pub camera: CameraProfile,
    pub default_radius: f64,
    /// Radius floor; smaller requests are ignored.
    pub min_radius: f64,
    pub edge_tolerance: f64,
    /// Hit radius around each frustum target.
    pub pick_radius: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            camera: CameraProfile::default(),
            default_radius: DEFAULT_RADIUS,
            min_radius: MINIMUM_RADIUS,
            edge_tolerance: EDGE_TOLERANCE_PX,
            pick_radius: TARGET_PICK_RADIUS,
        }
    }
}

/// Region parameter validation errors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RegionParamsError {
    #[error("min_radius must be finite and > 0 (got {0})")]
    InvalidMinRadius(f64),
    #[error("radius {radius} is below min_radius {min_radius}")]
    RadiusBelowMinimum { radius: f64, min_radius: f64 },
    #[error("edge_tolerance must be finite and > 0 (got {0})")]
    InvalidEdgeTolerance(f64),
    #[error("pick_radius must be finite and > 0 (got {0})")]
    InvalidPickRadius(f64),
}

impl RegionParams {
    pub fn validate(&self) -> Result<(), RegionParamsError> {
        if !self.min_radius.is_finite() || self.min_radius <= 0.0 {
            return Err(RegionParamsError::InvalidMinRadius(self.min_radius));
        }
        self.check_radius(self.default_radius)?;
        if !self.edge_tolerance.is_finite() || self.edge_tolerance <= 0.0 {
            return Err(RegionParamsError::InvalidEdgeTolerance(self.edge_tolerance));
        }
        if !self.pick_radius.is_finite() || self.pick_radius <= 0.0 {
            return Err(RegionParamsError::InvalidPickRadius(self.pick_radius));
        }
        Ok(())
    }

    pub(crate) fn check_radius(&self, radius: f64) -> Result<(), RegionParamsError> {
        if !radius.is_finite() || radius < self.min_radius {
            return Err(RegionParamsError::RadiusBelowMinimum {
                radius,
                min_radius: self.min_radius,
            });
        }
        Ok(())
    }
}

/// Overhead field image extent, used to mirror positions across its mid-lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldExtent {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldExtent {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 480.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RegionParams::default().validate(), Ok(()));
    }

    #[test]
    fn default_radius_below_floor_is_rejected() {
        let params = RegionParams {
            default_radius: 2.0,
            ..RegionParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(RegionParamsError::RadiusBelowMinimum { .. })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: RegionParams =
            serde_json::from_str(r#"{ "camera": "aibo", "min_radius": 2.0 }"#).expect("parse");
        assert_eq!(params.camera, CameraProfile::Aibo);
        assert_eq!(params.min_radius, 2.0);
        assert_eq!(params.default_radius, DEFAULT_RADIUS);
    }
}
