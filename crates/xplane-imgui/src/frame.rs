//! Per-frame plumbing between the translated event queue and the UI context.

use imgui::{Io, Key, Ui};
use xplane_imgui_core::{UiCapture, UiInputEvent};

use crate::keys;

/// What one frame produced, for logging and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Render callbacks invoked (visible ones only).
    pub callbacks: usize,
    /// Draw lists in the finalized draw data.
    pub draw_lists: usize,
    /// Total vertices across all draw lists.
    pub vertices: usize,
    /// Total indices across all draw lists.
    pub indices: usize,
}

/// Feeds the events queued since the last frame into the UI's input queue.
///
/// Events are applied in arrival order; the UI library trickles them out
/// itself so same-frame press/release pairs survive.
pub(crate) fn apply_events(io: &mut Io, events: Vec<UiInputEvent>) {
    for event in events {
        match event {
            UiInputEvent::MousePos { x, y } => io.add_mouse_pos_event([x, y]),
            UiInputEvent::MouseButton { button, down } => {
                io.add_mouse_button_event(keys::imgui_button(button), down);
            }
            UiInputEvent::Wheel {
                horizontal,
                vertical,
            } => io.add_mouse_wheel_event([horizontal, vertical]),
            UiInputEvent::Key { key, down } => io.add_key_event(keys::imgui_key(key), down),
            UiInputEvent::Modifiers {
                shift,
                control,
                option_alt,
            } => {
                io.add_key_event(Key::ModShift, shift);
                io.add_key_event(Key::ModCtrl, control);
                io.add_key_event(Key::ModAlt, option_alt);
            }
            UiInputEvent::Char(c) => io.add_input_character(c),
            UiInputEvent::FocusLost => io.app_focus_lost = true,
        }
    }
}

/// Reads the routing flags the frame settled on, for the next inter-frame
/// events to be routed against.
pub(crate) fn read_capture(ui: &Ui) -> UiCapture {
    UiCapture {
        wants_mouse: ui.io().want_capture_mouse,
        wants_keyboard: ui.io().want_capture_keyboard,
        cursor: ui.mouse_cursor().map(keys::cursor_shape),
    }
}
