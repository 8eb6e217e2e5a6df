//! Annotate where a robot stood and what its camera saw on an overhead field map.
//!
//! This facade re-exports the geometry from [`core`] and the interaction
//! state machine from [`chooser`], and adds [`session`] for replaying
//! recorded inputs from JSON.
//!
//! ```
//! use fov_locator::{UncertaintyRegion, Edge};
//! use nalgebra::Point2;
//!
//! let mut region = UncertaintyRegion::at(Point2::new(100.0, 100.0));
//! region.look_at(Point2::new(100.0, 0.0));
//! let a = region.frustum().edge_target(Edge::A);
//! assert!(a.y < 100.0);
//! ```

pub use fov_locator_chooser as chooser;
pub use fov_locator_core as core;

pub mod session;

pub use fov_locator_chooser::{Chooser, ChooserParams, Cursor, Feedback, Key, PointerEvent};
pub use fov_locator_core::{
    BearingBounds, CameraModel, CameraProfile, Edge, FieldExtent, FrustumFootprint,
    MirrorAxis, RegionParams, RegionSnapshot, SolveError, UncertaintyRegion, Vertex, ViewFrustum,
};
pub use session::{run_session, run_session_file, SessionEvent, SessionReport, SessionScript};
