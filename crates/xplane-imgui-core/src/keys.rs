//! Virtual-key translation from X-Plane key codes to UI key identifiers.

use bitflags::bitflags;

bitflags! {
    /// Modifier and transition bits of the host's key-event flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyFlags: u32 {
        /// A shift key is held.
        const SHIFT = 1;
        /// The option/alt key is held.
        const OPTION_ALT = 2;
        /// The control key is held.
        const CONTROL = 4;
        /// This event is a key press.
        const DOWN = 8;
        /// This event is a key release.
        const UP = 16;
    }
}

/// X-Plane virtual-key codes, as delivered in key callbacks.
///
/// The values below 0x80 follow the classic Windows virtual-key layout; the
/// 0xB0 block is X-Plane's own extension for punctuation and the keypad
/// enter/equal keys.
pub mod vk {
    pub const BACK: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    pub const CLEAR: u8 = 0x0C;
    pub const RETURN: u8 = 0x0D;
    pub const ESCAPE: u8 = 0x1B;
    pub const SPACE: u8 = 0x20;
    pub const PRIOR: u8 = 0x21;
    pub const NEXT: u8 = 0x22;
    pub const END: u8 = 0x23;
    pub const HOME: u8 = 0x24;
    pub const LEFT: u8 = 0x25;
    pub const UP: u8 = 0x26;
    pub const RIGHT: u8 = 0x27;
    pub const DOWN: u8 = 0x28;
    pub const INSERT: u8 = 0x2D;
    pub const DELETE: u8 = 0x2E;
    pub const HELP: u8 = 0x2F;
    pub const KEY_0: u8 = 0x30;
    pub const KEY_1: u8 = 0x31;
    pub const KEY_2: u8 = 0x32;
    pub const KEY_3: u8 = 0x33;
    pub const KEY_4: u8 = 0x34;
    pub const KEY_5: u8 = 0x35;
    pub const KEY_6: u8 = 0x36;
    pub const KEY_7: u8 = 0x37;
    pub const KEY_8: u8 = 0x38;
    pub const KEY_9: u8 = 0x39;
    pub const A: u8 = 0x41;
    pub const B: u8 = 0x42;
    pub const C: u8 = 0x43;
    pub const D: u8 = 0x44;
    pub const E: u8 = 0x45;
    pub const F: u8 = 0x46;
    pub const G: u8 = 0x47;
    pub const H: u8 = 0x48;
    pub const I: u8 = 0x49;
    pub const J: u8 = 0x4A;
    pub const K: u8 = 0x4B;
    pub const L: u8 = 0x4C;
    pub const M: u8 = 0x4D;
    pub const N: u8 = 0x4E;
    pub const O: u8 = 0x4F;
    pub const P: u8 = 0x50;
    pub const Q: u8 = 0x51;
    pub const R: u8 = 0x52;
    pub const S: u8 = 0x53;
    pub const T: u8 = 0x54;
    pub const U: u8 = 0x55;
    pub const V: u8 = 0x56;
    pub const W: u8 = 0x57;
    pub const X: u8 = 0x58;
    pub const Y: u8 = 0x59;
    pub const Z: u8 = 0x5A;
    pub const NUMPAD0: u8 = 0x60;
    pub const NUMPAD1: u8 = 0x61;
    pub const NUMPAD2: u8 = 0x62;
    pub const NUMPAD3: u8 = 0x63;
    pub const NUMPAD4: u8 = 0x64;
    pub const NUMPAD5: u8 = 0x65;
    pub const NUMPAD6: u8 = 0x66;
    pub const NUMPAD7: u8 = 0x67;
    pub const NUMPAD8: u8 = 0x68;
    pub const NUMPAD9: u8 = 0x69;
    pub const MULTIPLY: u8 = 0x6A;
    pub const ADD: u8 = 0x6B;
    pub const SEPARATOR: u8 = 0x6C;
    pub const SUBTRACT: u8 = 0x6D;
    pub const DECIMAL: u8 = 0x6E;
    pub const DIVIDE: u8 = 0x6F;
    pub const F1: u8 = 0x70;
    pub const F2: u8 = 0x71;
    pub const F3: u8 = 0x72;
    pub const F4: u8 = 0x73;
    pub const F5: u8 = 0x74;
    pub const F6: u8 = 0x75;
    pub const F7: u8 = 0x76;
    pub const F8: u8 = 0x77;
    pub const F9: u8 = 0x78;
    pub const F10: u8 = 0x79;
    pub const F11: u8 = 0x7A;
    pub const F12: u8 = 0x7B;
    pub const F13: u8 = 0x7C;
    pub const F14: u8 = 0x7D;
    pub const F15: u8 = 0x7E;
    pub const F16: u8 = 0x7F;
    pub const F17: u8 = 0x80;
    pub const F18: u8 = 0x81;
    pub const F19: u8 = 0x82;
    pub const F20: u8 = 0x83;
    pub const F21: u8 = 0x84;
    pub const F22: u8 = 0x85;
    pub const F23: u8 = 0x86;
    pub const F24: u8 = 0x87;
    pub const EQUAL: u8 = 0xB0;
    pub const MINUS: u8 = 0xB1;
    pub const RBRACE: u8 = 0xB2;
    pub const LBRACE: u8 = 0xB3;
    pub const QUOTE: u8 = 0xB4;
    pub const SEMICOLON: u8 = 0xB5;
    pub const BACKSLASH: u8 = 0xB6;
    pub const COMMA: u8 = 0xB7;
    pub const SLASH: u8 = 0xB8;
    pub const PERIOD: u8 = 0xB9;
    pub const BACKQUOTE: u8 = 0xBA;
    pub const ENTER: u8 = 0xBB;
    pub const NUMPAD_ENT: u8 = 0xBC;
    pub const NUMPAD_EQ: u8 = 0xBD;
}

/// Key identifiers understood by the UI layer.
///
/// Backend-neutral so the translation table can be exercised without a UI
/// context; the facade maps these onto the UI library's key enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
}

/// Translates an X-Plane virtual-key code into a UI key identifier.
///
/// This is a one-way static table. Codes without a UI equivalent (the
/// F13-F24 block, `CLEAR`, `HELP`, `SEPARATOR`, and anything X-Plane never
/// defines) return `None`; callers log and drop those events.
#[must_use]
pub fn ui_key_for_virtual_key(vk_code: u8) -> Option<UiKey> {
    match vk_code {
        vk::BACK => Some(UiKey::Backspace),
        vk::TAB => Some(UiKey::Tab),
        vk::RETURN | vk::ENTER => Some(UiKey::Enter),
        vk::ESCAPE => Some(UiKey::Escape),
        vk::SPACE => Some(UiKey::Space),
        vk::PRIOR => Some(UiKey::PageUp),
        vk::NEXT => Some(UiKey::PageDown),
        vk::END => Some(UiKey::End),
        vk::HOME => Some(UiKey::Home),
        vk::LEFT => Some(UiKey::LeftArrow),
        vk::UP => Some(UiKey::UpArrow),
        vk::RIGHT => Some(UiKey::RightArrow),
        vk::DOWN => Some(UiKey::DownArrow),
        vk::INSERT => Some(UiKey::Insert),
        vk::DELETE => Some(UiKey::Delete),
        vk::KEY_0 => Some(UiKey::Alpha0),
        vk::KEY_1 => Some(UiKey::Alpha1),
        vk::KEY_2 => Some(UiKey::Alpha2),
        vk::KEY_3 => Some(UiKey::Alpha3),
        vk::KEY_4 => Some(UiKey::Alpha4),
        vk::KEY_5 => Some(UiKey::Alpha5),
        vk::KEY_6 => Some(UiKey::Alpha6),
        vk::KEY_7 => Some(UiKey::Alpha7),
        vk::KEY_8 => Some(UiKey::Alpha8),
        vk::KEY_9 => Some(UiKey::Alpha9),
        vk::A => Some(UiKey::A),
        vk::B => Some(UiKey::B),
        vk::C => Some(UiKey::C),
        vk::D => Some(UiKey::D),
        vk::E => Some(UiKey::E),
        vk::F => Some(UiKey::F),
        vk::G => Some(UiKey::G),
        vk::H => Some(UiKey::H),
        vk::I => Some(UiKey::I),
        vk::J => Some(UiKey::J),
        vk::K => Some(UiKey::K),
        vk::L => Some(UiKey::L),
        vk::M => Some(UiKey::M),
        vk::N => Some(UiKey::N),
        vk::O => Some(UiKey::O),
        vk::P => Some(UiKey::P),
        vk::Q => Some(UiKey::Q),
        vk::R => Some(UiKey::R),
        vk::S => Some(UiKey::S),
        vk::T => Some(UiKey::T),
        vk::U => Some(UiKey::U),
        vk::V => Some(UiKey::V),
        vk::W => Some(UiKey::W),
        vk::X => Some(UiKey::X),
        vk::Y => Some(UiKey::Y),
        vk::Z => Some(UiKey::Z),
        vk::NUMPAD0 => Some(UiKey::Keypad0),
        vk::NUMPAD1 => Some(UiKey::Keypad1),
        vk::NUMPAD2 => Some(UiKey::Keypad2),
        vk::NUMPAD3 => Some(UiKey::Keypad3),
        vk::NUMPAD4 => Some(UiKey::Keypad4),
        vk::NUMPAD5 => Some(UiKey::Keypad5),
        vk::NUMPAD6 => Some(UiKey::Keypad6),
        vk::NUMPAD7 => Some(UiKey::Keypad7),
        vk::NUMPAD8 => Some(UiKey::Keypad8),
        vk::NUMPAD9 => Some(UiKey::Keypad9),
        vk::MULTIPLY => Some(UiKey::KeypadMultiply),
        vk::ADD => Some(UiKey::KeypadAdd),
        vk::SUBTRACT => Some(UiKey::KeypadSubtract),
        vk::DECIMAL => Some(UiKey::KeypadDecimal),
        vk::DIVIDE => Some(UiKey::KeypadDivide),
        vk::F1 => Some(UiKey::F1),
        vk::F2 => Some(UiKey::F2),
        vk::F3 => Some(UiKey::F3),
        vk::F4 => Some(UiKey::F4),
        vk::F5 => Some(UiKey::F5),
        vk::F6 => Some(UiKey::F6),
        vk::F7 => Some(UiKey::F7),
        vk::F8 => Some(UiKey::F8),
        vk::F9 => Some(UiKey::F9),
        vk::F10 => Some(UiKey::F10),
        vk::F11 => Some(UiKey::F11),
        vk::F12 => Some(UiKey::F12),
        vk::EQUAL => Some(UiKey::Equal),
        vk::MINUS => Some(UiKey::Minus),
        vk::RBRACE => Some(UiKey::RightBracket),
        vk::LBRACE => Some(UiKey::LeftBracket),
        vk::QUOTE => Some(UiKey::Apostrophe),
        vk::SEMICOLON => Some(UiKey::Semicolon),
        vk::BACKSLASH => Some(UiKey::Backslash),
        vk::COMMA => Some(UiKey::Comma),
        vk::SLASH => Some(UiKey::Slash),
        vk::PERIOD => Some(UiKey::Period),
        vk::BACKQUOTE => Some(UiKey::GraveAccent),
        vk::NUMPAD_ENT => Some(UiKey::KeypadEnter),
        vk::NUMPAD_EQ => Some(UiKey::KeypadEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_digits_and_arrows_map() {
        assert_eq!(ui_key_for_virtual_key(vk::A), Some(UiKey::A));
        assert_eq!(ui_key_for_virtual_key(vk::Z), Some(UiKey::Z));
        assert_eq!(ui_key_for_virtual_key(vk::KEY_0), Some(UiKey::Alpha0));
        assert_eq!(ui_key_for_virtual_key(vk::KEY_9), Some(UiKey::Alpha9));
        assert_eq!(ui_key_for_virtual_key(vk::LEFT), Some(UiKey::LeftArrow));
        assert_eq!(ui_key_for_virtual_key(vk::DOWN), Some(UiKey::DownArrow));
    }

    #[test]
    fn test_keypad_block_maps() {
        assert_eq!(ui_key_for_virtual_key(vk::NUMPAD0), Some(UiKey::Keypad0));
        assert_eq!(ui_key_for_virtual_key(vk::NUMPAD9), Some(UiKey::Keypad9));
        assert_eq!(ui_key_for_virtual_key(vk::MULTIPLY), Some(UiKey::KeypadMultiply));
        assert_eq!(ui_key_for_virtual_key(vk::DECIMAL), Some(UiKey::KeypadDecimal));
        assert_eq!(ui_key_for_virtual_key(vk::NUMPAD_ENT), Some(UiKey::KeypadEnter));
        assert_eq!(ui_key_for_virtual_key(vk::NUMPAD_EQ), Some(UiKey::KeypadEqual));
    }

    #[test]
    fn test_xplane_punctuation_block_maps() {
        assert_eq!(ui_key_for_virtual_key(vk::EQUAL), Some(UiKey::Equal));
        assert_eq!(ui_key_for_virtual_key(vk::LBRACE), Some(UiKey::LeftBracket));
        assert_eq!(ui_key_for_virtual_key(vk::RBRACE), Some(UiKey::RightBracket));
        assert_eq!(ui_key_for_virtual_key(vk::QUOTE), Some(UiKey::Apostrophe));
        assert_eq!(ui_key_for_virtual_key(vk::BACKQUOTE), Some(UiKey::GraveAccent));
        assert_eq!(ui_key_for_virtual_key(vk::ENTER), Some(UiKey::Enter));
    }

    #[test]
    fn test_both_return_codes_map_to_enter() {
        assert_eq!(ui_key_for_virtual_key(vk::RETURN), Some(UiKey::Enter));
        assert_eq!(ui_key_for_virtual_key(vk::ENTER), Some(UiKey::Enter));
    }

    #[test]
    fn test_unmapped_codes_yield_none() {
        assert_eq!(ui_key_for_virtual_key(vk::CLEAR), None);
        assert_eq!(ui_key_for_virtual_key(vk::HELP), None);
        assert_eq!(ui_key_for_virtual_key(vk::SEPARATOR), None);
        assert_eq!(ui_key_for_virtual_key(vk::F13), None);
        assert_eq!(ui_key_for_virtual_key(vk::F24), None);
        assert_eq!(ui_key_for_virtual_key(0x00), None);
        assert_eq!(ui_key_for_virtual_key(0xFF), None);
    }

    #[test]
    fn test_flag_word_bits() {
        let flags = KeyFlags::from_bits_truncate(8 | 1 | 4);
        assert!(flags.contains(KeyFlags::DOWN));
        assert!(flags.contains(KeyFlags::SHIFT));
        assert!(flags.contains(KeyFlags::CONTROL));
        assert!(!flags.contains(KeyFlags::UP));
        assert!(!flags.contains(KeyFlags::OPTION_ALT));
    }
}
