//! Raw device input events.
//!
//! This module defines the event vocabulary crossing the boundary between a
//! native [`EventSource`](crate::backend::EventSource) and the
//! [`InputManager`](crate::resources::input::InputManager):
//!
//! - [`InputCode`] identifies a physical key or mouse button. It is the key of
//!   the manager's code → actions index, so keyboard and mouse codes share one
//!   map without colliding.
//! - [`InputEvent`] is one discrete thing that happened this frame.

use raylib::prelude::Vector2;

/// A physical input, tagged by device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    /// Keyboard key code as reported by the platform.
    Keyboard(i32),
    /// Mouse button id as reported by the platform.
    MouseButton(i32),
}

/// A discrete device event.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key went down. `repeat` is set for auto-repeat signals of a key that
    /// is already held.
    KeyDown { code: i32, repeat: bool },
    /// A key went up.
    KeyUp { code: i32 },
    /// A mouse button went down at `position` (window pixels).
    MouseButtonDown { button: i32, position: Vector2 },
    /// A mouse button went up at `position` (window pixels).
    MouseButtonUp { button: i32, position: Vector2 },
    /// The pointer moved to `position` (window pixels).
    MouseMotion { position: Vector2 },
    /// The user asked to close the application.
    Quit,
}

impl InputEvent {
    /// The device code carried by key and button events.
    pub fn code(&self) -> Option<InputCode> {
        match *self {
            InputEvent::KeyDown { code, .. } | InputEvent::KeyUp { code } => {
                Some(InputCode::Keyboard(code))
            }
            InputEvent::MouseButtonDown { button, .. } | InputEvent::MouseButtonUp { button, .. } => {
                Some(InputCode::MouseButton(button))
            }
            InputEvent::MouseMotion { .. } | InputEvent::Quit => None,
        }
    }
}
