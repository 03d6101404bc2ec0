//! Input events delivered to the alignment controller.
//!
//! Front ends translate their toolkit events into [`InputEvent`] so the
//! controller can be driven (and tested) without a display.

use crate::keycode::Key;

/// Scroll direction for mouse wheel events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Scrolling up (away from user).
    Up,
    /// Scrolling down (toward user).
    Down,
    /// Scrolling left.
    Left,
    /// Scrolling right.
    Right,
}

/// An input event received by one monitor's overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed down.
    KeyPress(Key),
    /// The mouse moved; coordinates are global (virtual screen).
    MouseMove {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
    },
    /// The mouse moved while the primary button was held.
    MouseDrag {
        /// Horizontal movement since the previous drag event, in pixels.
        dx: i32,
        /// Vertical movement since the previous drag event, in pixels.
        dy: i32,
    },
    /// The pointer left the overlay.
    MouseLeave,
    /// The mouse wheel was scrolled.
    Wheel(ScrollDirection),
}

/// Whether the controller consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The event was handled; the front end should not process it further.
    Consumed,
    /// The event was ignored; the front end may apply its default handling.
    Unhandled,
}

impl Propagation {
    /// Check if the event was consumed.
    pub fn is_consumed(&self) -> bool {
        matches!(self, Propagation::Consumed)
    }
}
