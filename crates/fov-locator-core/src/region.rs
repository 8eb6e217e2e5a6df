//! Position uncertainty circle carrying the camera frustum.

use std::fmt;

use log::{debug, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::bearing::BearingBounds;
use crate::circle::SolveError;
use crate::frustum::{Edge, EdgeDrag, FrustumSnapshot, Vertex, ViewFrustum};
use crate::params::{FieldExtent, RegionParams, RegionParamsError};

/// Field mid-line to mirror a region across.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    /// Flip left/right about the vertical mid-line.
    X,
    /// Flip top/bottom about the horizontal mid-line.
    Y,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub center: Point2<f64>,
    pub radius: f64,
    pub frustum: FrustumSnapshot,
}

/// Circle of candidate robot positions, owning the frustum anchored at its center.
///
/// The center and the frustum origin always move together, except for
/// [`UncertaintyRegion::drag_edge_target`], which first solves for a new
/// origin and then moves both to it.
#[derive(Clone, Debug, PartialEq)]
pub struct UncertaintyRegion {
    params: RegionParams,
    initial_center: Point2<f64>,
    center: Point2<f64>,
    radius: f64,
    frustum: ViewFrustum,
}

impl UncertaintyRegion {
    /// Region at `center` with default radius and gaze.
    pub fn new(center: Point2<f64>, params: RegionParams) -> Result<Self, RegionParamsError> {
        params.validate().inspect_err(|err| warn!("rejecting region params: {err}"))?;
        Ok(Self::from_validated(center, params.default_radius, params))
    }

    pub fn with_radius(
        center: Point2<f64>,
        radius: f64,
        params: RegionParams,
    ) -> Result<Self, RegionParamsError> {
        params
            .validate()
            .and_then(|()| params.check_radius(radius))
            .inspect_err(|err| warn!("rejecting region params: {err}"))?;
        Ok(Self::from_validated(center, radius, params))
    }

    /// Region at `center` using [`RegionParams::default`].
    pub fn at(center: Point2<f64>) -> Self {
        let params = RegionParams::default();
        Self::from_validated(center, params.default_radius, params)
    }

    fn from_validated(center: Point2<f64>, radius: f64, params: RegionParams) -> Self {
        Self {
            params,
            initial_center: center,
            center,
            radius,
            frustum: ViewFrustum::new(center, params.camera.model()),
        }
    }

    #[inline]
    pub fn params(&self) -> &RegionParams {
        &self.params
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn frustum(&self) -> &ViewFrustum {
        &self.frustum
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        (p - self.center).norm() <= self.radius
    }

    /// True when `p` is close enough to the rim to resize the circle.
    pub fn near_edge(&self, p: Point2<f64>) -> bool {
        (self.radius - (p - self.center).norm()).abs() < self.params.edge_tolerance
    }

    /// Set the radius; values below the minimum are ignored.
    pub fn set_radius(&mut self, radius: f64) {
        if radius >= self.params.min_radius {
            self.radius = radius;
        } else {
            debug!(
                "ignoring radius {radius:.2} below minimum {:.2}",
                self.params.min_radius
            );
        }
    }

    pub fn grow(&mut self, delta: f64) {
        self.set_radius(self.radius + delta);
    }

    pub fn grow_to_point(&mut self, p: Point2<f64>) {
        self.set_radius((p - self.center).norm());
    }

    pub fn look_at(&mut self, target: Point2<f64>) {
        self.frustum.look_at(target);
    }

    pub fn rotate(&mut self, delta_deg: f64) {
        self.frustum.rotate(delta_deg);
    }

    pub fn set_pivot(&mut self, vertex: Option<Vertex>) {
        self.frustum.set_pivot(vertex);
    }

    pub fn move_by(&mut self, dx: f64, dy: f64, track_target: bool) {
        self.center.x += dx;
        self.center.y += dy;
        self.frustum.move_by(dx, dy, track_target);
    }

    pub fn move_to(&mut self, center: Point2<f64>, track_target: bool) {
        self.center = center;
        self.frustum.move_to(center, track_target);
    }

    /// Drag an edge target, then move the region to the solved origin.
    ///
    /// Returns the new center and the corner now holding `point`, which is
    /// the opposite one if the drag carried it across the other corner.
    /// When no origin reproduces the dragged triangle the region is left
    /// unchanged.
    pub fn drag_edge_target(
        &mut self,
        edge: Edge,
        point: Point2<f64>,
        central_pivot: bool,
    ) -> Result<EdgeDrag, SolveError> {
        let drag = self.frustum.drag_edge(edge, point, central_pivot)?;
        self.center = drag.origin;
        self.frustum.set_origin(drag.origin);
        Ok(drag)
    }

    pub fn reset(&mut self) {
        self.center = self.initial_center;
        self.frustum.reset();
    }

    pub fn vertex_at(&self, p: Point2<f64>) -> Option<Vertex> {
        self.frustum.vertex_at(p, self.params.pick_radius)
    }

    /// Inside the circle or over one of the frustum targets.
    pub fn in_target(&self, p: Point2<f64>) -> bool {
        self.contains(p) || self.vertex_at(p).is_some()
    }

    pub fn bearing_bounds(&self, object: Point2<f64>) -> BearingBounds {
        self.frustum.bearing_bounds(object, self.radius)
    }

    /// Fresh region at the center reflected across the field's mid-line(s).
    pub fn mirrored(&self, axis: MirrorAxis, field: FieldExtent) -> UncertaintyRegion {
        let mut c = self.center;
        if matches!(axis, MirrorAxis::X | MirrorAxis::Both) {
            c.x = field.width - c.x;
        }
        if matches!(axis, MirrorAxis::Y | MirrorAxis::Both) {
            c.y = field.height - c.y;
        }
        Self::from_validated(c, self.params.default_radius, self.params)
    }

    pub fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            center: self.center,
            radius: self.radius,
            frustum: self.frustum.snapshot(),
        }
    }
}

impl fmt::Display for UncertaintyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location: ({:.1}, {:.1}) Radius: {:.1} Angle: {:.2}\u{b0}",
            self.center.x,
            self.center.y,
            self.radius,
            self.frustum.gaze_deg()
        )
    }
}
