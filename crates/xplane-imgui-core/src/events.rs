//! Translated input events queued for the UI context.

use crate::keys::UiKey;

/// Mouse buttons the host reports to the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    pub(crate) fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
        }
    }
}

/// Phase of a host mouse-click gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseStatus {
    Down,
    Drag,
    Up,
}

/// Scroll-wheel axis, as encoded on the host wire (0 vertical, 1 horizontal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelAxis {
    Vertical,
    Horizontal,
}

impl WheelAxis {
    /// Decodes the host's wheel-axis integer; unknown values fall back to
    /// vertical, matching how the sim treats legacy mice.
    #[must_use]
    pub fn from_wire(axis: i32) -> Self {
        if axis == 1 {
            WheelAxis::Horizontal
        } else {
            WheelAxis::Vertical
        }
    }
}

/// Whether the UI consumed an event or the host should keep handling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The UI owns the event; the host must not act on it.
    Consumed,
    /// The event is released back to the host.
    PassThrough,
}

impl EventDisposition {
    /// The integer the host expects from its click/wheel handlers
    /// (1 = handled, 0 = propagate).
    #[must_use]
    pub fn as_host_return(self) -> i32 {
        match self {
            EventDisposition::Consumed => 1,
            EventDisposition::PassThrough => 0,
        }
    }
}

/// A keyboard-focus action the host glue must carry out for the overlay
/// window after a click decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Take keyboard focus and bring the overlay window to the front.
    Acquire,
    /// Hand keyboard focus back to the sim.
    Release,
}

/// One translated input event, drained into the UI context at the start of
/// each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiInputEvent {
    /// Cursor position in UI coordinates (top-left origin).
    MousePos { x: f32, y: f32 },
    /// Button transition.
    MouseButton { button: MouseButton, down: bool },
    /// Scroll delta in wheel clicks.
    Wheel { horizontal: f32, vertical: f32 },
    /// Key transition for a mapped key.
    Key { key: UiKey, down: bool },
    /// Modifier snapshot, forwarded with every mapped key event.
    Modifiers {
        shift: bool,
        control: bool,
        option_alt: bool,
    },
    /// Printable character for text-input widgets.
    Char(char),
    /// The UI lost keyboard focus; all key state must be cleared.
    FocusLost,
}
