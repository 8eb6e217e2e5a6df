//! Built-in camera profiles.

use serde::{Deserialize, Serialize};

/// Camera mounting height above the ground, in field units (cm).
pub const DEFAULT_MOUNT_HEIGHT: f64 = 63.0;

/// Named camera hardware with fixed field-of-view angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraProfile {
    #[default]
    Nao,
    Aibo,
}

impl CameraProfile {
    pub fn horizontal_fov_deg(self) -> f64 {
        match self {
            CameraProfile::Nao => 46.4,
            CameraProfile::Aibo => 56.9,
        }
    }

    pub fn vertical_fov_deg(self) -> f64 {
        match self {
            CameraProfile::Nao => 34.8,
            CameraProfile::Aibo => 45.2,
        }
    }

    pub fn model(self) -> CameraModel {
        CameraModel {
            horizontal_fov_deg: self.horizontal_fov_deg(),
            vertical_fov_deg: self.vertical_fov_deg(),
            mount_height: DEFAULT_MOUNT_HEIGHT,
        }
    }
}

impl std::str::FromStr for CameraProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nao" => Ok(CameraProfile::Nao),
            "aibo" => Ok(CameraProfile::Aibo),
            other => Err(format!("unknown camera profile `{other}` (expected nao or aibo)")),
        }
    }
}

/// Angular extent and mounting of a camera, fixed for the lifetime of a frustum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    pub horizontal_fov_deg: f64,
    /// Only used for the near-field blind zone.
    pub vertical_fov_deg: f64,
    pub mount_height: f64,
}

impl Default for CameraModel {
    fn default() -> Self {
        CameraProfile::default().model()
    }
}

impl CameraModel {
    #[inline]
    pub fn half_fov_deg(&self) -> f64 {
        self.horizontal_fov_deg / 2.0
    }

    /// Ground distance from the camera below which nothing is visible when
    /// looking straight ahead.
    pub fn distance_to_visible_ground(&self) -> f64 {
        let alpha = (180.0 - self.vertical_fov_deg) / 2.0;
        self.mount_height * alpha.to_radians().tan()
    }
}
