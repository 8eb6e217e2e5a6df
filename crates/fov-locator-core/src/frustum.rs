//! Overhead camera frustum: origin, gaze and the three draggable targets.
//!
//! Seen from above, the visible part of the field is an isosceles triangle
//! with its apex at the camera (the origin) and apex angle equal to the
//! horizontal field of view. Three targets describe it:
//! - the primary target, on the gaze ray;
//! - edge target A, on the ray at `gaze - fov/2`;
//! - edge target B, on the ray at `gaze + fov/2`.
//!
//! The edge targets sit where the line through the primary target,
//! perpendicular to the gaze, crosses the two edge rays. Every mutator leaves
//! the four points consistent with the gaze angle and the field of view.

use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::angle::{bearing_deg, polar_offset};
use crate::camera::CameraModel;
use crate::circle::{circle_intersection, SolveError};

/// Pick radius around each target for hit testing.
pub const TARGET_PICK_RADIUS: f64 = 5.0;

/// Offset from the origin of the default gaze point (straight down-field).
pub const DEFAULT_GAZE_OFFSET: [f64; 2] = [0.0, -100.0];

/// One of the three frustum targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertex {
    Primary,
    EdgeA,
    EdgeB,
}

impl Vertex {
    /// The corner this vertex stands for, if it is not the primary target.
    #[inline]
    pub fn edge(self) -> Option<Edge> {
        match self {
            Vertex::Primary => None,
            Vertex::EdgeA => Some(Edge::A),
            Vertex::EdgeB => Some(Edge::B),
        }
    }
}

/// One of the two frustum corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    A,
    B,
}

impl Edge {
    #[inline]
    pub fn opposite(self) -> Edge {
        match self {
            Edge::A => Edge::B,
            Edge::B => Edge::A,
        }
    }

    #[inline]
    pub fn vertex(self) -> Vertex {
        match self {
            Edge::A => Vertex::EdgeA,
            Edge::B => Vertex::EdgeB,
        }
    }
}

/// Read-only view of a frustum for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrustumSnapshot {
    pub origin: Point2<f64>,
    pub gaze_deg: f64,
    pub primary_target: Point2<f64>,
    pub edge_target_a: Point2<f64>,
    pub edge_target_b: Point2<f64>,
    pub pivot: Option<Vertex>,
}

/// Outcome of an edge drag: the apex to move to and the corner now holding
/// the dragged point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDrag {
    pub origin: Point2<f64>,
    pub edge: Edge,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewFrustum {
    camera: CameraModel,
    initial_origin: Point2<f64>,
    origin: Point2<f64>,
    /// Unbounded; only its value modulo 360 matters.
    gaze_deg: f64,
    primary: Point2<f64>,
    edge_a: Point2<f64>,
    edge_b: Point2<f64>,
    pivot: Option<Vertex>,
}

impl ViewFrustum {
    /// Create a frustum at `origin` looking at the default gaze point.
    pub fn new(origin: Point2<f64>, camera: CameraModel) -> Self {
        let mut frustum = Self {
            camera,
            initial_origin: origin,
            origin,
            gaze_deg: 0.0,
            primary: origin,
            edge_a: origin,
            edge_b: origin,
            pivot: None,
        };
        frustum.look_at(default_gaze_point(origin));
        frustum
    }

    #[inline]
    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    #[inline]
    pub fn origin(&self) -> Point2<f64> {
        self.origin
    }

    #[inline]
    pub fn initial_origin(&self) -> Point2<f64> {
        self.initial_origin
    }

    #[inline]
    pub fn gaze_deg(&self) -> f64 {
        self.gaze_deg
    }

    #[inline]
    pub fn primary_target(&self) -> Point2<f64> {
        self.primary
    }

    #[inline]
    pub fn edge_target(&self, edge: Edge) -> Point2<f64> {
        match edge {
            Edge::A => self.edge_a,
            Edge::B => self.edge_b,
        }
    }

    pub fn target(&self, vertex: Vertex) -> Point2<f64> {
        match vertex {
            Vertex::Primary => self.primary,
            Vertex::EdgeA => self.edge_a,
            Vertex::EdgeB => self.edge_b,
        }
    }

    #[inline]
    pub fn pivot(&self) -> Option<Vertex> {
        self.pivot
    }

    /// Make `vertex` the only pivot, or clear the pivot with `None`.
    ///
    /// Purely an interaction hint; it never affects the geometry.
    pub fn set_pivot(&mut self, vertex: Option<Vertex>) {
        self.pivot = vertex;
    }

    /// Aim the gaze at `target` and rebuild both edge targets.
    ///
    /// A target equal to the origin yields a zero-length frustum.
    pub fn look_at(&mut self, target: Point2<f64>) {
        self.primary = target;
        self.gaze_deg = bearing_deg(self.origin, target);

        let central_length = (target - self.origin).norm();
        let half = self.camera.half_fov_deg();
        let hypot_length = central_length / half.to_radians().cos();

        self.edge_a = self.origin + polar_offset(hypot_length, self.gaze_deg - half);
        self.edge_b = self.origin + polar_offset(hypot_length, self.gaze_deg + half);
    }

    /// Drag one edge target to `point` and solve for the origin that would
    /// produce the resulting triangle.
    ///
    /// With `central_pivot` the primary target stays fixed and the opposite
    /// edge target is mirrored through it; otherwise the opposite edge target
    /// stays fixed and the primary target becomes the midpoint of the edges.
    ///
    /// On success the targets and gaze are updated and the origin candidate
    /// closest to the current origin is returned; the origin itself is left
    /// for the caller to apply (see [`ViewFrustum::set_origin`]). On failure
    /// nothing changes.
    ///
    /// A drag that carries one corner across the other relabels them, so
    /// edge A stays clockwise of the gaze as seen from the returned origin.
    /// Use [`ViewFrustum::drag_edge`] to learn which label `point` ended up
    /// under.
    pub fn set_edge_target(
        &mut self,
        edge: Edge,
        point: Point2<f64>,
        central_pivot: bool,
    ) -> Result<Point2<f64>, SolveError> {
        self.drag_edge(edge, point, central_pivot).map(|drag| drag.origin)
    }

    /// [`ViewFrustum::set_edge_target`], also reporting the corner now
    /// holding `point`.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn drag_edge(
        &mut self,
        edge: Edge,
        point: Point2<f64>,
        central_pivot: bool,
    ) -> Result<EdgeDrag, SolveError> {
        let mut edge_a = self.edge_a;
        let mut edge_b = self.edge_b;
        let mut primary = self.primary;

        let mirrored = primary + (primary - point);
        match (edge, central_pivot) {
            (Edge::A, true) => {
                edge_a = point;
                edge_b = mirrored;
            }
            (Edge::B, true) => {
                edge_b = point;
                edge_a = mirrored;
            }
            (Edge::A, false) => edge_a = point,
            (Edge::B, false) => edge_b = point,
        }
        if !central_pivot {
            primary = nalgebra::center(&edge_a, &edge_b);
        }

        let candidates = self.origin_candidates(edge_a, edge_b)?;
        let origin = nearest_to(candidates, self.origin);

        // Edge A must lie clockwise of the gaze from the apex.
        let mut dragged = edge;
        if (primary - origin).perp(&(edge_a - origin)) > 0.0 {
            std::mem::swap(&mut edge_a, &mut edge_b);
            dragged = edge.opposite();
        }

        self.edge_a = edge_a;
        self.edge_b = edge_b;
        self.primary = primary;
        self.gaze_deg = bearing_deg(self.origin, primary);

        Ok(EdgeDrag {
            origin,
            edge: dragged,
        })
    }

    /// Both apex positions for a frustum whose corners are `edge_a` and `edge_b`.
    ///
    /// The apex lies on both circles of radius `base / (2 sin(fov/2))` centered
    /// at the corners; the two candidates mirror each other across the base.
    pub fn origin_candidates(
        &self,
        edge_a: Point2<f64>,
        edge_b: Point2<f64>,
    ) -> Result<[Point2<f64>; 2], SolveError> {
        let base = (edge_b - edge_a).norm();
        let side = base / (2.0 * self.camera.half_fov_deg().to_radians().sin());
        circle_intersection(edge_a, side, edge_b, side)
    }

    /// Apex for the corners `edge_a`/`edge_b` closest to the current origin.
    pub fn origin_from_targets(
        &self,
        edge_a: Point2<f64>,
        edge_b: Point2<f64>,
    ) -> Result<Point2<f64>, SolveError> {
        let candidates = self.origin_candidates(edge_a, edge_b)?;
        Ok(nearest_to(candidates, self.origin))
    }

    /// Relocate the origin, keeping the targets and re-aiming at the primary one.
    pub fn set_origin(&mut self, origin: Point2<f64>) {
        self.origin = origin;
        self.gaze_deg = bearing_deg(origin, self.primary);
    }

    /// Translate the origin by `(dx, dy)`.
    ///
    /// With `track_target` the gaze is re-aimed at the same primary target;
    /// otherwise the whole frustum moves rigidly.
    pub fn move_by(&mut self, dx: f64, dy: f64, track_target: bool) {
        let delta = Vector2::new(dx, dy);
        self.origin += delta;
        self.follow_origin(delta, track_target);
    }

    pub fn move_to(&mut self, origin: Point2<f64>, track_target: bool) {
        let delta = origin - self.origin;
        self.origin = origin;
        self.follow_origin(delta, track_target);
    }

    fn follow_origin(&mut self, delta: Vector2<f64>, track_target: bool) {
        if track_target {
            self.look_at(self.primary);
        } else {
            self.primary += delta;
            self.edge_a += delta;
            self.edge_b += delta;
        }
    }

    /// Turn the gaze by `delta_deg`, swinging the targets around the origin.
    pub fn rotate(&mut self, delta_deg: f64) {
        self.gaze_deg += delta_deg;
        let rot = Rotation2::new(delta_deg.to_radians());
        let origin = self.origin;
        for p in [&mut self.primary, &mut self.edge_a, &mut self.edge_b] {
            *p = origin + rot * (*p - origin);
        }
    }

    /// Back to the construction-time origin and default gaze.
    pub fn reset(&mut self) {
        self.origin = self.initial_origin;
        self.look_at(default_gaze_point(self.initial_origin));
    }

    pub fn distance_to_visible_ground(&self) -> f64 {
        self.camera.distance_to_visible_ground()
    }

    pub fn target_contains(&self, vertex: Vertex, p: Point2<f64>, pick_radius: f64) -> bool {
        (p - self.target(vertex)).norm() <= pick_radius
    }

    /// First target under `p`, checked in primary, A, B order.
    pub fn vertex_at(&self, p: Point2<f64>, pick_radius: f64) -> Option<Vertex> {
        [Vertex::Primary, Vertex::EdgeA, Vertex::EdgeB]
            .into_iter()
            .find(|&v| self.target_contains(v, p, pick_radius))
    }

    pub fn snapshot(&self) -> FrustumSnapshot {
        FrustumSnapshot {
            origin: self.origin,
            gaze_deg: self.gaze_deg,
            primary_target: self.primary,
            edge_target_a: self.edge_a,
            edge_target_b: self.edge_b,
            pivot: self.pivot,
        }
    }
}

fn default_gaze_point(origin: Point2<f64>) -> Point2<f64> {
    origin + Vector2::new(DEFAULT_GAZE_OFFSET[0], DEFAULT_GAZE_OFFSET[1])
}

fn nearest_to(candidates: [Point2<f64>; 2], reference: Point2<f64>) -> Point2<f64> {
    let [p, q] = candidates;
    if (p - reference).norm() <= (q - reference).norm() {
        p
    } else {
        q
    }
}
