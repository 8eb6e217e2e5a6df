use fov_locator_core::SolveError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Pointer position in field coordinates plus modifier state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub shift: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, shift: false }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    #[inline]
    pub fn pos(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Keyboard commands. Letter aliases follow the default key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    #[serde(alias = "j")]
    RotateCcw,
    #[serde(alias = "k")]
    RotateCw,
    #[serde(alias = "r")]
    Reset,
    Up,
    Down,
    Left,
    Right,
    #[serde(alias = "a")]
    Grow,
    #[serde(alias = "s")]
    Shrink,
}

/// Pointer shape the UI should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    /// Over the rim: resize.
    Crosshair,
    /// Over something grabbable.
    Hand,
    /// While moving or dragging.
    Move,
}

/// What the UI should do after an input.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Feedback {
    /// `None` keeps the current cursor.
    pub cursor: Option<Cursor>,
    pub repaint: bool,
    /// Set when an edge drag had no geometric solution and was dropped.
    pub rejected: Option<SolveError>,
}

impl Feedback {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn repaint() -> Self {
        Self {
            repaint: true,
            ..Self::default()
        }
    }

    pub(crate) fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}
