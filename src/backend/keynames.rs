//! Platform key-name table.
//!
//! Bindings in the configuration file refer to keys by name. Names follow the
//! SDL convention (`Space`, `Return`, `Left Shift`, `F5`, `Keypad 8`, `,`) and are
//! matched case-insensitively; a few common aliases (`Enter`, `Esc`, `Ctrl`)
//! are accepted too. Mouse buttons use the literal names `MouseLeft`,
//! `MouseMiddle`, `MouseRight`, `MouseX1` and `MouseX2`.
//!
//! Codes are raylib key and mouse-button values.

use raylib::ffi::{KeyboardKey, MouseButton};

use crate::events::input::InputCode;

/// Resolve a configured name to a device code, keyboard first.
pub fn input_code_from_name(name: &str) -> Option<InputCode> {
    if let Some(code) = scancode_from_name(name) {
        return Some(InputCode::Keyboard(code));
    }
    mouse_button_from_name(name).map(InputCode::MouseButton)
}

/// Keyboard key code for `name`, or `None` if the name is not a key.
pub fn scancode_from_name(name: &str) -> Option<i32> {
    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Letters and digits map to their ASCII code
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase() as i32);
        }
        return punctuation_key(c).map(|key| key as i32);
    }

    let lower = name.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("keypad ") {
        return keypad_key(rest);
    }
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<i32>().ok()) {
        return if (1..=12).contains(&n) {
            Some(KeyboardKey::KEY_F1 as i32 + (n - 1))
        } else {
            None
        };
    }

    let key = match lower.as_str() {
        "space" => KeyboardKey::KEY_SPACE,
        "escape" | "esc" => KeyboardKey::KEY_ESCAPE,
        "return" | "enter" => KeyboardKey::KEY_ENTER,
        "tab" => KeyboardKey::KEY_TAB,
        "backspace" => KeyboardKey::KEY_BACKSPACE,
        "insert" => KeyboardKey::KEY_INSERT,
        "delete" => KeyboardKey::KEY_DELETE,
        "left" => KeyboardKey::KEY_LEFT,
        "right" => KeyboardKey::KEY_RIGHT,
        "up" => KeyboardKey::KEY_UP,
        "down" => KeyboardKey::KEY_DOWN,
        "home" => KeyboardKey::KEY_HOME,
        "end" => KeyboardKey::KEY_END,
        "pageup" => KeyboardKey::KEY_PAGE_UP,
        "pagedown" => KeyboardKey::KEY_PAGE_DOWN,
        "left shift" | "shift" => KeyboardKey::KEY_LEFT_SHIFT,
        "right shift" => KeyboardKey::KEY_RIGHT_SHIFT,
        "left ctrl" | "ctrl" => KeyboardKey::KEY_LEFT_CONTROL,
        "right ctrl" => KeyboardKey::KEY_RIGHT_CONTROL,
        "left alt" | "alt" => KeyboardKey::KEY_LEFT_ALT,
        "right alt" => KeyboardKey::KEY_RIGHT_ALT,
        "left gui" => KeyboardKey::KEY_LEFT_SUPER,
        "right gui" => KeyboardKey::KEY_RIGHT_SUPER,
        "menu" | "application" => KeyboardKey::KEY_KB_MENU,
        "capslock" => KeyboardKey::KEY_CAPS_LOCK,
        "scrolllock" => KeyboardKey::KEY_SCROLL_LOCK,
        "numlock" | "numlockclear" => KeyboardKey::KEY_NUM_LOCK,
        "printscreen" => KeyboardKey::KEY_PRINT_SCREEN,
        "pause" => KeyboardKey::KEY_PAUSE,
        _ => return None,
    };
    Some(key as i32)
}

fn punctuation_key(c: char) -> Option<KeyboardKey> {
    let key = match c {
        ',' => KeyboardKey::KEY_COMMA,
        '.' => KeyboardKey::KEY_PERIOD,
        '-' => KeyboardKey::KEY_MINUS,
        '=' => KeyboardKey::KEY_EQUAL,
        ';' => KeyboardKey::KEY_SEMICOLON,
        '\'' => KeyboardKey::KEY_APOSTROPHE,
        '`' => KeyboardKey::KEY_GRAVE,
        '[' => KeyboardKey::KEY_LEFT_BRACKET,
        ']' => KeyboardKey::KEY_RIGHT_BRACKET,
        '/' => KeyboardKey::KEY_SLASH,
        '\\' => KeyboardKey::KEY_BACKSLASH,
        _ => return None,
    };
    Some(key)
}

/// Numeric keypad keys, named `Keypad 0`..`Keypad 9`, `Keypad Enter`,
/// `Keypad +` and so on.
fn keypad_key(rest: &str) -> Option<i32> {
    let mut chars = rest.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Some(digit) = c.to_digit(10)
    {
        return Some(KeyboardKey::KEY_KP_0 as i32 + digit as i32);
    }
    let key = match rest {
        "enter" => KeyboardKey::KEY_KP_ENTER,
        "+" => KeyboardKey::KEY_KP_ADD,
        "-" => KeyboardKey::KEY_KP_SUBTRACT,
        "*" => KeyboardKey::KEY_KP_MULTIPLY,
        "/" => KeyboardKey::KEY_KP_DIVIDE,
        "." | "period" => KeyboardKey::KEY_KP_DECIMAL,
        "=" => KeyboardKey::KEY_KP_EQUAL,
        _ => return None,
    };
    Some(key as i32)
}

/// Mouse button id for one of the literal mouse names.
///
/// Matching is exact, like the configuration format documents it.
pub fn mouse_button_from_name(name: &str) -> Option<i32> {
    let button = match name.trim() {
        "MouseLeft" => MouseButton::MOUSE_BUTTON_LEFT,
        "MouseMiddle" => MouseButton::MOUSE_BUTTON_MIDDLE,
        "MouseRight" => MouseButton::MOUSE_BUTTON_RIGHT,
        "MouseX1" => MouseButton::MOUSE_BUTTON_SIDE,
        "MouseX2" => MouseButton::MOUSE_BUTTON_EXTRA,
        _ => return None,
    };
    Some(button as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(scancode_from_name("A"), Some(KeyboardKey::KEY_A as i32));
        assert_eq!(scancode_from_name("k"), Some(KeyboardKey::KEY_K as i32));
        assert_eq!(scancode_from_name("7"), Some(KeyboardKey::KEY_SEVEN as i32));
    }

    #[test]
    fn test_named_keys_are_case_insensitive() {
        assert_eq!(scancode_from_name("Space"), Some(KeyboardKey::KEY_SPACE as i32));
        assert_eq!(scancode_from_name("SPACE"), Some(KeyboardKey::KEY_SPACE as i32));
        assert_eq!(scancode_from_name("Return"), Some(KeyboardKey::KEY_ENTER as i32));
        assert_eq!(scancode_from_name("Left Shift"), Some(KeyboardKey::KEY_LEFT_SHIFT as i32));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(scancode_from_name("F1"), Some(KeyboardKey::KEY_F1 as i32));
        assert_eq!(scancode_from_name("f12"), Some(KeyboardKey::KEY_F12 as i32));
        assert_eq!(scancode_from_name("F13"), None);
    }

    #[test]
    fn test_keypad_keys() {
        assert_eq!(scancode_from_name("Keypad 8"), Some(KeyboardKey::KEY_KP_8 as i32));
        assert_eq!(scancode_from_name("keypad 0"), Some(KeyboardKey::KEY_KP_0 as i32));
        assert_eq!(scancode_from_name("Keypad Enter"), Some(KeyboardKey::KEY_KP_ENTER as i32));
        assert_eq!(scancode_from_name("Keypad +"), Some(KeyboardKey::KEY_KP_ADD as i32));
        assert_eq!(scancode_from_name("Keypad Banana"), None);
    }

    #[test]
    fn test_punctuation_keys() {
        assert_eq!(scancode_from_name(","), Some(KeyboardKey::KEY_COMMA as i32));
        assert_eq!(scancode_from_name("-"), Some(KeyboardKey::KEY_MINUS as i32));
        assert_eq!(scancode_from_name("'"), Some(KeyboardKey::KEY_APOSTROPHE as i32));
        assert_eq!(scancode_from_name("["), Some(KeyboardKey::KEY_LEFT_BRACKET as i32));
        assert_eq!(scancode_from_name("`"), Some(KeyboardKey::KEY_GRAVE as i32));
        assert_eq!(scancode_from_name("!"), None);
    }

    #[test]
    fn test_lock_gui_and_print_keys() {
        assert_eq!(scancode_from_name("CapsLock"), Some(KeyboardKey::KEY_CAPS_LOCK as i32));
        assert_eq!(scancode_from_name("Numlock"), Some(KeyboardKey::KEY_NUM_LOCK as i32));
        assert_eq!(scancode_from_name("ScrollLock"), Some(KeyboardKey::KEY_SCROLL_LOCK as i32));
        assert_eq!(scancode_from_name("Left GUI"), Some(KeyboardKey::KEY_LEFT_SUPER as i32));
        assert_eq!(scancode_from_name("Right GUI"), Some(KeyboardKey::KEY_RIGHT_SUPER as i32));
        assert_eq!(scancode_from_name("PrintScreen"), Some(KeyboardKey::KEY_PRINT_SCREEN as i32));
        assert_eq!(scancode_from_name("Pause"), Some(KeyboardKey::KEY_PAUSE as i32));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(scancode_from_name("NotAKey"), None);
        assert_eq!(input_code_from_name("MouseWheel"), None);
        assert_eq!(input_code_from_name(""), None);
    }

    #[test]
    fn test_mouse_names_resolve_to_mouse_codes() {
        assert_eq!(
            input_code_from_name("MouseLeft"),
            Some(InputCode::MouseButton(MouseButton::MOUSE_BUTTON_LEFT as i32))
        );
        assert_eq!(
            input_code_from_name("MouseX2"),
            Some(InputCode::MouseButton(MouseButton::MOUSE_BUTTON_EXTRA as i32))
        );
        // mouse names are exact
        assert_eq!(mouse_button_from_name("mouseleft"), None);
    }
}
