//! World-space position component.
//!
//! Entities with a [`MapPosition`] live in the level and are drawn through
//! the [`Camera`](crate::resources::camera::Camera) transform. The position
//! is the top-left corner of the sprite.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.pos.x += dx;
        self.pos.y += dy;
    }
}
