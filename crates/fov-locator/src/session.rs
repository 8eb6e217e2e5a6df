//! Scripted annotation sessions: JSON in, region report out.

use std::{fs, path::Path};

use fov_locator_chooser::{Chooser, ChooserParams, Key, PointerEvent};
use fov_locator_core::{
    BearingBounds, FrustumFootprint, RegionParams, RegionParamsError, RegionSnapshot,
    UncertaintyRegion,
};
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum SessionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] SessionIoError),
    #[error(transparent)]
    Params(#[from] RegionParamsError),
}

/// One recorded input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Hover(PointerEvent),
    Press(PointerEvent),
    Drag(PointerEvent),
    Release(PointerEvent),
    Key {
        key: Key,
        #[serde(default)]
        shift: bool,
    },
}

/// A starting placement plus the inputs to replay on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub center: Point2<f64>,
    /// Overrides `region.default_radius` when set.
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub region: RegionParams,
    #[serde(default)]
    pub chooser: ChooserParams,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
    /// Field objects to report relative bearings for.
    #[serde(default)]
    pub objects: Vec<Point2<f64>>,
}

impl SessionScript {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn build_region(&self) -> Result<UncertaintyRegion, RegionParamsError> {
        match self.radius {
            Some(r) => UncertaintyRegion::with_radius(self.center, r, self.region),
            None => UncertaintyRegion::new(self.center, self.region),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectBearing {
    pub object: Point2<f64>,
    pub bounds: BearingBounds,
}

/// Final state after replaying a script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub region: RegionSnapshot,
    pub footprint: FrustumFootprint,
    /// Human-readable status line, as shown above the map.
    pub display: String,
    pub events_applied: usize,
    /// Edge drags dropped because no camera position reproduces them.
    pub rejected_drags: usize,
    pub bearings: Vec<ObjectBearing>,
}

impl SessionReport {
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Replay `script` through a fresh [`Chooser`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(script), fields(events = script.events.len()))
)]
pub fn run_session(script: &SessionScript) -> Result<SessionReport, RegionParamsError> {
    let mut region = script.build_region()?;
    let mut chooser = Chooser::new(script.chooser);
    let mut rejected_drags = 0;

    for (i, event) in script.events.iter().enumerate() {
        let feedback = match *event {
            SessionEvent::Hover(ev) => chooser.hover(&mut region, ev),
            SessionEvent::Press(ev) => chooser.press(&mut region, ev),
            SessionEvent::Drag(ev) => chooser.drag(&mut region, ev),
            SessionEvent::Release(ev) => chooser.release(&region, ev),
            SessionEvent::Key { key, shift } => chooser.key(&mut region, key, shift),
        };
        if feedback.rejected.is_some() {
            rejected_drags += 1;
        }
        debug!("event {i}: {event:?} -> {feedback:?}");
    }

    let bearings = script
        .objects
        .iter()
        .map(|&object| ObjectBearing {
            object,
            bounds: region.bearing_bounds(object),
        })
        .collect();

    info!(
        "replayed {} events ({} rejected): {}",
        script.events.len(),
        rejected_drags,
        region
    );

    Ok(SessionReport {
        region: region.snapshot(),
        footprint: region.frustum().footprint(),
        display: region.to_string(),
        events_applied: script.events.len(),
        rejected_drags,
        bearings,
    })
}

/// Load a script from disk and replay it.
pub fn run_session_file(path: impl AsRef<Path>) -> Result<SessionReport, SessionError> {
    let script = SessionScript::load_json(path)?;
    Ok(run_session(&script)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fov_locator_core::Edge;

    fn script(events: &str) -> SessionScript {
        let json = format!(r#"{{ "center": [100.0, 100.0], "events": {events} }}"#);
        serde_json::from_str(&json).expect("script")
    }

    #[test]
    fn empty_script_reports_initial_placement() {
        let report = run_session(&script("[]")).expect("run");
        assert_eq!(report.region.center, Point2::new(100.0, 100.0));
        assert_eq!(report.region.radius, 25.0);
        assert_abs_diff_eq!(report.region.frustum.gaze_deg, -90.0, epsilon = 1e-12);
        assert_eq!(report.events_applied, 0);
    }

    #[test]
    fn drag_session_moves_region() {
        let _ = env_logger::builder().is_test(true).try_init();
        let report = run_session(&script(
            r#"[
                { "press": { "x": 100.0, "y": 100.0 } },
                { "drag": { "x": 130.0, "y": 120.0 } },
                { "release": { "x": 130.0, "y": 120.0 } },
                { "key": { "key": "a" } }
            ]"#,
        ))
        .expect("run");
        assert_eq!(report.region.center, Point2::new(130.0, 120.0));
        assert_eq!(report.region.radius, 35.0);
        assert_eq!(report.events_applied, 4);
        assert_eq!(report.rejected_drags, 0);
    }

    #[test]
    fn collapsed_edge_drag_is_counted_as_rejected() {
        let region = UncertaintyRegion::at(Point2::new(100.0, 100.0));
        let a = region.frustum().edge_target(Edge::A);
        let b = region.frustum().edge_target(Edge::B);
        let events = format!(
            r#"[
                {{ "press": {{ "x": {}, "y": {} }} }},
                {{ "drag": {{ "x": {}, "y": {}, "shift": true }} }}
            ]"#,
            a.x, a.y, b.x, b.y
        );
        let report = run_session(&script(&events)).expect("run");
        assert_eq!(report.rejected_drags, 1);
        assert_eq!(report.region.center, Point2::new(100.0, 100.0));
    }

    #[test]
    fn invalid_radius_is_an_error() {
        let mut s = script("[]");
        s.radius = Some(1.0);
        assert!(matches!(
            run_session(&s),
            Err(RegionParamsError::RadiusBelowMinimum { .. })
        ));
    }
}
