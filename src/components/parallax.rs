//! Parallax background layer component.
//!
//! A [`ParallaxLayer`] entity is drawn in the background pass through
//! [`Renderer::draw_parallax`](crate::resources::renderer::Renderer::draw_parallax).
//! The scroll factor says how much the layer follows the camera on each axis:
//! `1` moves with the world, `0` is pinned to the screen, values in between
//! read as distant scenery.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct ParallaxLayer {
    pub scroll_factor: Vector2,
    /// Tile horizontally across the whole viewport.
    pub repeat_x: bool,
    /// Tile vertically across the whole viewport.
    pub repeat_y: bool,
}

impl ParallaxLayer {
    pub fn new(factor_x: f32, factor_y: f32) -> Self {
        Self {
            scroll_factor: Vector2 {
                x: factor_x,
                y: factor_y,
            },
            repeat_x: false,
            repeat_y: false,
        }
    }

    /// Builder-style: set tiling per axis.
    pub fn with_repeat(mut self, repeat_x: bool, repeat_y: bool) -> Self {
        self.repeat_x = repeat_x;
        self.repeat_y = repeat_y;
        self
    }
}
