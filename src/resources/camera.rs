//! Scrolling 2D camera resource.
//!
//! The camera is a viewport-sized window onto the world. Its `position` is the
//! world coordinate shown at the top-left corner of the screen, so the
//! transforms are plain translations:
//!
//! - world → screen: `p - position`
//! - screen → world: `s + position`
//! - parallax layer: `p - position * factor` (per axis)
//!
//! An optional limit rectangle keeps the view inside the level. Every mutation
//! re-clamps the position. An axis on which the bound is narrower than the
//! viewport cannot be satisfied and is left unclamped.

use bevy_ecs::prelude::Resource;
use log::trace;
use raylib::prelude::{Rectangle, Vector2};

/// ECS resource holding the active view.
#[derive(Resource, Debug, Clone)]
pub struct Camera {
    viewport_size: Vector2,
    position: Vector2,
    limit_bounds: Option<Rectangle>,
}

impl Camera {
    /// Create a camera with a fixed viewport size, clamped immediately.
    pub fn new(viewport_size: Vector2, position: Vector2, limit_bounds: Option<Rectangle>) -> Self {
        let mut camera = Self {
            viewport_size,
            position,
            limit_bounds,
        };
        camera.clamp_position();
        trace!(
            "Camera created: viewport {}x{} at ({}, {})",
            viewport_size.x, viewport_size.y, camera.position.x, camera.position.y
        );
        camera
    }

    /// Translate the view by `offset`.
    pub fn move_by(&mut self, offset: Vector2) {
        self.position.x += offset.x;
        self.position.y += offset.y;
        self.clamp_position();
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.clamp_position();
    }

    /// Replace (or remove) the limit rectangle and re-clamp.
    pub fn set_limit_bounds(&mut self, bounds: Option<Rectangle>) {
        self.limit_bounds = bounds;
        self.clamp_position();
    }

    pub fn world_to_screen(&self, world_pos: Vector2) -> Vector2 {
        Vector2 {
            x: world_pos.x - self.position.x,
            y: world_pos.y - self.position.y,
        }
    }

    /// Transform for a layer that follows the camera by `factor` per axis.
    ///
    /// A factor of `1` matches [`world_to_screen`](Self::world_to_screen); `0`
    /// pins the layer to the screen.
    pub fn world_to_screen_with_parallax(&self, world_pos: Vector2, factor: Vector2) -> Vector2 {
        Vector2 {
            x: world_pos.x - self.position.x * factor.x,
            y: world_pos.y - self.position.y * factor.y,
        }
    }

    pub fn screen_to_world(&self, screen_pos: Vector2) -> Vector2 {
        Vector2 {
            x: screen_pos.x + self.position.x,
            y: screen_pos.y + self.position.y,
        }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn viewport_size(&self) -> Vector2 {
        self.viewport_size
    }

    pub fn limit_bounds(&self) -> Option<Rectangle> {
        self.limit_bounds
    }

    fn clamp_position(&mut self) {
        let Some(bounds) = self.limit_bounds else {
            return;
        };
        if bounds.width >= self.viewport_size.x {
            let max_x = bounds.x + bounds.width - self.viewport_size.x;
            self.position.x = self.position.x.clamp(bounds.x, max_x);
        }
        if bounds.height >= self.viewport_size.y {
            let max_y = bounds.y + bounds.height - self.viewport_size.y;
            self.position.y = self.position.y.clamp(bounds.y, max_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2 { x, y }
    }

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_world_to_screen() {
        let camera = Camera::new(v(800.0, 600.0), v(100.0, 50.0), None);
        let s = camera.world_to_screen(v(150.0, 80.0));
        assert_eq!((s.x, s.y), (50.0, 30.0));
    }

    #[test]
    fn test_round_trip() {
        let camera = Camera::new(v(800.0, 600.0), v(-37.5, 12.25), None);
        for p in [v(0.0, 0.0), v(123.5, -8.0), v(-400.0, 900.0)] {
            let back = camera.screen_to_world(camera.world_to_screen(p));
            assert_eq!((back.x, back.y), (p.x, p.y));
        }
    }

    #[test]
    fn test_parallax_identity_and_pinned() {
        let camera = Camera::new(v(800.0, 600.0), v(200.0, 40.0), None);
        let p = v(300.0, 100.0);

        let plain = camera.world_to_screen(p);
        let full = camera.world_to_screen_with_parallax(p, v(1.0, 1.0));
        assert_eq!((plain.x, plain.y), (full.x, full.y));

        let pinned = camera.world_to_screen_with_parallax(p, v(0.0, 0.0));
        assert_eq!((pinned.x, pinned.y), (300.0, 100.0));

        let half = camera.world_to_screen_with_parallax(p, v(0.5, 0.0));
        assert_eq!((half.x, half.y), (200.0, 100.0));
    }

    #[test]
    fn test_move_by_accumulates() {
        let mut camera = Camera::new(v(800.0, 600.0), v(0.0, 0.0), None);
        camera.move_by(v(10.0, -5.0));
        camera.move_by(v(2.5, 1.0));
        assert_eq!((camera.position().x, camera.position().y), (12.5, -4.0));
    }

    #[test]
    fn test_clamp_on_construction_and_move() {
        let bounds = rect(0.0, 0.0, 2000.0, 1000.0);
        let mut camera = Camera::new(v(800.0, 600.0), v(-50.0, 900.0), Some(bounds));
        assert_eq!((camera.position().x, camera.position().y), (0.0, 400.0));

        camera.move_by(v(5000.0, -5000.0));
        assert_eq!((camera.position().x, camera.position().y), (1200.0, 0.0));

        camera.set_position(v(600.0, 200.0));
        assert_eq!((camera.position().x, camera.position().y), (600.0, 200.0));
    }

    #[test]
    fn test_set_limit_bounds_reclamps() {
        let mut camera = Camera::new(v(800.0, 600.0), v(3000.0, 3000.0), None);
        camera.set_limit_bounds(Some(rect(100.0, 100.0, 1000.0, 700.0)));
        assert_eq!((camera.position().x, camera.position().y), (300.0, 200.0));

        camera.set_limit_bounds(None);
        camera.move_by(v(-1000.0, 0.0));
        assert_eq!(camera.position().x, -700.0);
    }

    #[test]
    fn test_narrow_axis_is_left_unclamped() {
        // wider than the viewport horizontally, shorter vertically
        let bounds = rect(0.0, 0.0, 1600.0, 300.0);
        let mut camera = Camera::new(v(800.0, 600.0), v(0.0, 0.0), Some(bounds));
        camera.move_by(v(2000.0, 750.0));
        assert_eq!(camera.position().x, 800.0);
        assert_eq!(camera.position().y, 750.0);
    }

    #[test]
    fn test_bound_equal_to_viewport_pins_axis() {
        let bounds = rect(10.0, 20.0, 800.0, 600.0);
        let mut camera = Camera::new(v(800.0, 600.0), v(0.0, 0.0), Some(bounds));
        camera.move_by(v(123.0, -45.0));
        assert_eq!((camera.position().x, camera.position().y), (10.0, 20.0));
    }
}
