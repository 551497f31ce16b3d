//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores an entity's position in screen
//! (pixel) coordinates. Use this for HUD elements that should not move with
//! the camera. An optional [`UiSize`] stretches the sprite to a fixed size.
//!
//! For world-space entities, see
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Screen-space top-left corner of a HUD sprite.
///
/// The render system draws these after the world pass, without culling.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    /// 2D coordinates in screen pixels.
    pub pos: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl ScreenPosition {
    /// Create a ScreenPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Builder-style: return a copy with a different X.
    pub fn with_x(mut self, x: f32) -> Self {
        self.pos.x = x;
        self
    }

    /// Builder-style: return a copy with a different Y.
    pub fn with_y(mut self, y: f32) -> Self {
        self.pos.y = y;
        self
    }
}

/// Explicit on-screen size for a HUD sprite, in pixels.
///
/// Without it the sprite is drawn at its source size.
#[derive(Component, Clone, Copy, Debug)]
pub struct UiSize {
    pub size: Vector2,
}

impl UiSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2 {
                x: width,
                y: height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_creates_correct_position() {
        let pos = ScreenPosition::new(10.0, 20.0);
        assert!(approx_eq(pos.pos.x, 10.0));
        assert!(approx_eq(pos.pos.y, 20.0));
    }

    #[test]
    fn test_default_is_zero() {
        let pos = ScreenPosition::default();
        assert!(approx_eq(pos.pos.x, 0.0));
        assert!(approx_eq(pos.pos.y, 0.0));
    }

    #[test]
    fn test_builder_chaining() {
        let pos = ScreenPosition::new(0.0, 0.0).with_x(10.0).with_y(20.0);
        assert!(approx_eq(pos.pos.x, 10.0));
        assert!(approx_eq(pos.pos.y, 20.0));
    }

    #[test]
    fn test_ui_size() {
        let size = UiSize::new(64.0, 8.0);
        assert!(approx_eq(size.size.x, 64.0));
        assert!(approx_eq(size.size.y, 8.0));
    }
}
