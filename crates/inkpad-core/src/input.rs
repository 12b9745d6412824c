//! Pointer events for driving the controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event with coordinates relative to the surface's top-left
/// origin.
///
/// The controller maps these onto its gesture operations: press begins a
/// gesture, move samples it, enter re-anchors it after the pointer
/// re-entered the surface mid-gesture, and release ends it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Primary button pressed.
    Press { position: Point },
    /// Pointer moved.
    Move { position: Point },
    /// Pointer re-entered the surface with the gesture still active.
    Enter { position: Point },
    /// Primary button released.
    Release,
}
