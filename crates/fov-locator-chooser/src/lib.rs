//! Interaction layer for placing a robot on the field map.
//!
//! A UI toolkit forwards raw pointer and key events to a [`Chooser`] together
//! with the [`fov_locator_core::UncertaintyRegion`] being edited, then applies
//! the returned [`Feedback`] (cursor shape, whether to repaint).

mod chooser;
mod input;

pub use chooser::{Chooser, ChooserParams, DragState};
pub use input::{Cursor, Feedback, Key, PointerEvent};
