//! Geometry of a robot's camera view as seen on an overhead field map.
//!
//! An annotator places the robot (an [`UncertaintyRegion`]: a circle of
//! candidate positions) and its gaze; the [`ViewFrustum`] turns that into the
//! triangle of field the camera sees. Dragging any frustum target re-solves
//! the rest so the triangle always matches the camera's field of view.
//!
//! This crate is purely geometric and synchronous. It knows nothing about
//! pixels, widgets or input devices.

mod angle;
mod bearing;
mod camera;
mod circle;
mod footprint;
mod frustum;
mod logger;
mod params;
mod region;

pub use angle::{angle_between_deg, bearing_deg, normalize_deg, polar_offset};
pub use bearing::BearingBounds;
pub use camera::{CameraModel, CameraProfile, DEFAULT_MOUNT_HEIGHT};
pub use circle::{circle_intersection, SolveError};
pub use footprint::{FrustumFootprint, FAR_RANGE};
pub use frustum::{
    Edge, EdgeDrag, FrustumSnapshot, Vertex, ViewFrustum, DEFAULT_GAZE_OFFSET,
    TARGET_PICK_RADIUS,
};
pub use params::{
    FieldExtent, RegionParams, RegionParamsError, DEFAULT_RADIUS, EDGE_TOLERANCE_PX,
    MINIMUM_RADIUS,
};
pub use region::{MirrorAxis, RegionSnapshot, UncertaintyRegion};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
