//! Conversions from the core's backend-neutral input types to the UI
//! library's enums.

use imgui::{Key, MouseButton as UiMouseButton, MouseCursor};
use xplane_imgui_core::{CursorShape, MouseButton, UiKey};

/// Maps a translated key identifier onto the UI library's key enum.
#[must_use]
pub fn imgui_key(key: UiKey) -> Key {
    match key {
        UiKey::Tab => Key::Tab,
        UiKey::LeftArrow => Key::LeftArrow,
        UiKey::RightArrow => Key::RightArrow,
        UiKey::UpArrow => Key::UpArrow,
        UiKey::DownArrow => Key::DownArrow,
        UiKey::PageUp => Key::PageUp,
        UiKey::PageDown => Key::PageDown,
        UiKey::Home => Key::Home,
        UiKey::End => Key::End,
        UiKey::Insert => Key::Insert,
        UiKey::Delete => Key::Delete,
        UiKey::Backspace => Key::Backspace,
        UiKey::Space => Key::Space,
        UiKey::Enter => Key::Enter,
        UiKey::Escape => Key::Escape,
        UiKey::Apostrophe => Key::Apostrophe,
        UiKey::Comma => Key::Comma,
        UiKey::Minus => Key::Minus,
        UiKey::Period => Key::Period,
        UiKey::Slash => Key::Slash,
        UiKey::Semicolon => Key::Semicolon,
        UiKey::Equal => Key::Equal,
        UiKey::LeftBracket => Key::LeftBracket,
        UiKey::Backslash => Key::Backslash,
        UiKey::RightBracket => Key::RightBracket,
        UiKey::GraveAccent => Key::GraveAccent,
        UiKey::Alpha0 => Key::Alpha0,
        UiKey::Alpha1 => Key::Alpha1,
        UiKey::Alpha2 => Key::Alpha2,
        UiKey::Alpha3 => Key::Alpha3,
        UiKey::Alpha4 => Key::Alpha4,
        UiKey::Alpha5 => Key::Alpha5,
        UiKey::Alpha6 => Key::Alpha6,
        UiKey::Alpha7 => Key::Alpha7,
        UiKey::Alpha8 => Key::Alpha8,
        UiKey::Alpha9 => Key::Alpha9,
        UiKey::A => Key::A,
        UiKey::B => Key::B,
        UiKey::C => Key::C,
        UiKey::D => Key::D,
        UiKey::E => Key::E,
        UiKey::F => Key::F,
        UiKey::G => Key::G,
        UiKey::H => Key::H,
        UiKey::I => Key::I,
        UiKey::J => Key::J,
        UiKey::K => Key::K,
        UiKey::L => Key::L,
        UiKey::M => Key::M,
        UiKey::N => Key::N,
        UiKey::O => Key::O,
        UiKey::P => Key::P,
        UiKey::Q => Key::Q,
        UiKey::R => Key::R,
        UiKey::S => Key::S,
        UiKey::T => Key::T,
        UiKey::U => Key::U,
        UiKey::V => Key::V,
        UiKey::W => Key::W,
        UiKey::X => Key::X,
        UiKey::Y => Key::Y,
        UiKey::Z => Key::Z,
        UiKey::F1 => Key::F1,
        UiKey::F2 => Key::F2,
        UiKey::F3 => Key::F3,
        UiKey::F4 => Key::F4,
        UiKey::F5 => Key::F5,
        UiKey::F6 => Key::F6,
        UiKey::F7 => Key::F7,
        UiKey::F8 => Key::F8,
        UiKey::F9 => Key::F9,
        UiKey::F10 => Key::F10,
        UiKey::F11 => Key::F11,
        UiKey::F12 => Key::F12,
        UiKey::Keypad0 => Key::Keypad0,
        UiKey::Keypad1 => Key::Keypad1,
        UiKey::Keypad2 => Key::Keypad2,
        UiKey::Keypad3 => Key::Keypad3,
        UiKey::Keypad4 => Key::Keypad4,
        UiKey::Keypad5 => Key::Keypad5,
        UiKey::Keypad6 => Key::Keypad6,
        UiKey::Keypad7 => Key::Keypad7,
        UiKey::Keypad8 => Key::Keypad8,
        UiKey::Keypad9 => Key::Keypad9,
        UiKey::KeypadDecimal => Key::KeypadDecimal,
        UiKey::KeypadDivide => Key::KeypadDivide,
        UiKey::KeypadMultiply => Key::KeypadMultiply,
        UiKey::KeypadSubtract => Key::KeypadSubtract,
        UiKey::KeypadAdd => Key::KeypadAdd,
        UiKey::KeypadEnter => Key::KeypadEnter,
        UiKey::KeypadEqual => Key::KeypadEqual,
    }
}

/// Maps a translated mouse button onto the UI library's button enum.
#[must_use]
pub fn imgui_button(button: MouseButton) -> UiMouseButton {
    match button {
        MouseButton::Left => UiMouseButton::Left,
        MouseButton::Right => UiMouseButton::Right,
    }
}

/// Maps the UI library's requested cursor back into the core's shape type.
#[must_use]
pub fn cursor_shape(cursor: MouseCursor) -> CursorShape {
    match cursor {
        MouseCursor::TextInput => CursorShape::TextInput,
        MouseCursor::ResizeAll => CursorShape::ResizeAll,
        MouseCursor::ResizeNS => CursorShape::ResizeNS,
        MouseCursor::ResizeEW => CursorShape::ResizeEW,
        MouseCursor::ResizeNESW => CursorShape::ResizeNESW,
        MouseCursor::ResizeNWSE => CursorShape::ResizeNWSE,
        MouseCursor::Hand => CursorShape::Hand,
        MouseCursor::NotAllowed => CursorShape::NotAllowed,
        MouseCursor::Arrow => CursorShape::Arrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xplane_imgui_core::keys::{ui_key_for_virtual_key, vk};

    #[test]
    fn test_virtual_keys_reach_the_ui_enum() {
        // End-to-end through both tables: host code to UI key.
        let key = ui_key_for_virtual_key(vk::A).map(imgui_key);
        assert_eq!(key, Some(Key::A));
        let enter = ui_key_for_virtual_key(vk::NUMPAD_ENT).map(imgui_key);
        assert_eq!(enter, Some(Key::KeypadEnter));
        let bracket = ui_key_for_virtual_key(vk::LBRACE).map(imgui_key);
        assert_eq!(bracket, Some(Key::LeftBracket));
    }

    #[test]
    fn test_cursor_shapes_cover_the_ui_set() {
        assert_eq!(cursor_shape(MouseCursor::Arrow), CursorShape::Arrow);
        assert_eq!(cursor_shape(MouseCursor::Hand), CursorShape::Hand);
        assert_eq!(cursor_shape(MouseCursor::TextInput), CursorShape::TextInput);
    }
}
