//! Pointer/keyboard state machine driving an [`UncertaintyRegion`].
//!
//! The region is passed into every call; the chooser only remembers what the
//! pointer is currently doing.

use fov_locator_core::{Edge, UncertaintyRegion, Vertex};
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::input::{Cursor, Feedback, Key, PointerEvent};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Step sizes for keyboard commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChooserParams {
    pub rotate_step_deg: f64,
    pub move_step: f64,
    pub grow_step: f64,
}

impl Default for ChooserParams {
    fn default() -> Self {
        Self {
            rotate_step_deg: 2.0,
            move_step: 10.0,
            grow_step: 10.0,
        }
    }
}

/// What a held-down pointer is doing.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Translating the whole region; `last` is the previous pointer position.
    Moving { last: Point2<f64> },
    Resizing,
    Dragging(Vertex),
}

#[derive(Clone, Debug, Default)]
pub struct Chooser {
    params: ChooserParams,
    state: DragState,
    /// Last hover was on the circle's rim.
    at_edge: bool,
}

impl Chooser {
    pub fn new(params: ChooserParams) -> Self {
        Self {
            params,
            state: DragState::Idle,
            at_edge: false,
        }
    }

    #[inline]
    pub fn params(&self) -> &ChooserParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Forget any in-progress interaction, e.g. after the region was replaced.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.at_edge = false;
    }

    /// Pointer moved with no button held.
    pub fn hover(&mut self, region: &mut UncertaintyRegion, ev: PointerEvent) -> Feedback {
        let p = ev.pos();

        if region.near_edge(p) {
            self.at_edge = true;
            return Feedback::none().cursor(Cursor::Crosshair);
        }
        self.at_edge = false;

        if region.contains(p) {
            region.set_pivot((!ev.shift).then_some(Vertex::Primary));
            return Feedback::repaint().cursor(Cursor::Hand);
        }

        match region.vertex_at(p).map(Vertex::edge) {
            Some(None) => Feedback::none().cursor(Cursor::Hand),
            Some(Some(edge)) => {
                region.set_pivot(Some(edge_drag_pivot(edge, ev.shift)));
                Feedback::repaint().cursor(Cursor::Hand)
            }
            None => {
                let had_pivot = region.frustum().pivot().is_some();
                region.set_pivot(None);
                Feedback {
                    repaint: had_pivot,
                    ..Feedback::none().cursor(Cursor::Default)
                }
            }
        }
    }

    /// Button pressed. Pressing on empty field resets the region.
    pub fn press(&mut self, region: &mut UncertaintyRegion, ev: PointerEvent) -> Feedback {
        let p = ev.pos();

        if self.at_edge {
            self.state = DragState::Resizing;
            return Feedback::none();
        }
        if region.contains(p) {
            self.state = DragState::Moving { last: p };
            return Feedback::none().cursor(Cursor::Move);
        }
        if let Some(v) = region.vertex_at(p) {
            debug!("start dragging {v:?}");
            self.state = DragState::Dragging(v);
            return Feedback::repaint().cursor(Cursor::Move);
        }

        debug!("press on empty field; resetting region");
        region.reset();
        Feedback::repaint()
    }

    /// Pointer moved with the button held.
    ///
    /// Shift switches moves to rigid translation and edge drags to pivoting
    /// around the opposite edge target instead of the primary target.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, region)))]
    pub fn drag(&mut self, region: &mut UncertaintyRegion, ev: PointerEvent) -> Feedback {
        let p = ev.pos();
        let track = !ev.shift;

        match self.state {
            DragState::Idle => return Feedback::none(),
            DragState::Moving { last } => {
                let d = p - last;
                self.state = DragState::Moving { last: p };
                region.move_by(d.x, d.y, track);
                region.set_pivot(track.then_some(Vertex::Primary));
            }
            DragState::Resizing => region.grow_to_point(p),
            DragState::Dragging(v) => {
                let Some(edge) = v.edge() else {
                    region.look_at(p);
                    return Feedback::repaint();
                };
                match region.drag_edge_target(edge, p, track) {
                    Ok(drag) => {
                        if drag.edge != edge {
                            debug!("{edge:?} crossed over; now dragging {:?}", drag.edge);
                            self.state = DragState::Dragging(drag.edge.vertex());
                        }
                        region.set_pivot(Some(edge_drag_pivot(drag.edge, ev.shift)));
                    }
                    Err(err) => {
                        debug!("dropping drag of {edge:?} to ({:.1}, {:.1}): {err}", p.x, p.y);
                        region.set_pivot(Some(edge_drag_pivot(edge, ev.shift)));
                        return Feedback {
                            rejected: Some(err),
                            ..Feedback::repaint()
                        };
                    }
                }
            }
        }
        Feedback::repaint()
    }

    /// Button released.
    pub fn release(&mut self, region: &UncertaintyRegion, ev: PointerEvent) -> Feedback {
        self.state = DragState::Idle;
        let cursor = if region.in_target(ev.pos()) {
            Cursor::Hand
        } else {
            Cursor::Default
        };
        Feedback::none().cursor(cursor)
    }

    /// Keyboard command. With shift, arrow moves keep the gaze on its target.
    pub fn key(&mut self, region: &mut UncertaintyRegion, key: Key, shift: bool) -> Feedback {
        let ChooserParams {
            rotate_step_deg,
            move_step,
            grow_step,
        } = self.params;

        match key {
            Key::RotateCcw => region.rotate(rotate_step_deg),
            Key::RotateCw => region.rotate(-rotate_step_deg),
            Key::Reset => region.reset(),
            Key::Up => region.move_by(0.0, -move_step, shift),
            Key::Down => region.move_by(0.0, move_step, shift),
            Key::Left => region.move_by(-move_step, 0.0, shift),
            Key::Right => region.move_by(move_step, 0.0, shift),
            Key::Grow => region.grow(grow_step),
            Key::Shrink => region.grow(-grow_step),
        }
        Feedback::repaint()
    }
}

/// Pivot shown while dragging `edge`: the primary target when centered,
/// otherwise the opposite edge target.
fn edge_drag_pivot(edge: Edge, shift: bool) -> Vertex {
    if shift {
        edge.opposite().vertex()
    } else {
        Vertex::Primary
    }
}
