//! Render dispatcher.
//!
//! [`Renderer`] turns sprite draw requests into [`DrawCall`]s on a native
//! [`DrawTarget`]. World sprites go through the [`Camera`] transform and are
//! culled against the viewport; parallax layers are tiled; HUD sprites are
//! drawn in screen space as given.
//!
//! Textures are looked up by the sprite's id in the
//! [`ResourceManager`]. Lookups go through `get_texture`, so an
//! id that was never preloaded is loaded on first use.
//!
//! Failures (unknown texture, invalid source rectangle, native draw error) are
//! logged and the draw is skipped. Nothing here aborts a frame.

use bevy_ecs::prelude::*;
use log::{error, trace};
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::backend::{AssetLoader, DrawCall, DrawTarget, NativeTexture};
use crate::components::parallax::ParallaxLayer;
use crate::components::sprite::Sprite;
use crate::error::SetupError;
use crate::resources::camera::Camera;
use crate::resources::resourcemanager::ResourceManager;

/// Smallest on-screen parallax tile, in pixels, on either axis.
pub const MIN_PARALLAX_TILE: f32 = 1.0;

/// Owner of the draw target and the current clear colour.
pub struct Renderer<D: DrawTarget> {
    target: D,
    draw_color: Color,
}

impl<D: DrawTarget> Renderer<D> {
    pub fn new(target: D) -> Self {
        trace!("Renderer created");
        Self {
            target,
            draw_color: Color::BLACK,
        }
    }

    /// Build the renderer from collaborators already inserted in `world`.
    ///
    /// Requires a `ResourceManager<A>` and takes ownership of the `D` draw
    /// target (both non-send resources). Fails without touching the world
    /// when the resource manager is missing.
    pub fn from_world<A>(world: &mut World) -> Result<Self, SetupError>
    where
        A: AssetLoader<Texture = D::Texture> + 'static,
        D: 'static,
    {
        if world.get_non_send_resource::<ResourceManager<A>>().is_none() {
            error!("Renderer: no ResourceManager in the world");
            return Err(SetupError::MissingCollaborator("ResourceManager"));
        }
        let Some(target) = world.remove_non_send_resource::<D>() else {
            error!("Renderer: no draw target in the world");
            return Err(SetupError::MissingCollaborator("DrawTarget"));
        };
        Ok(Self::new(target))
    }

    /// Draw a world-space sprite with its top-left corner at `position`.
    ///
    /// The sampled region is scaled by `scale` and rotated by `angle` degrees
    /// about its centre. Sprites entirely outside the viewport are skipped;
    /// touching an edge still counts as visible.
    pub fn draw_sprite<A>(
        &mut self,
        resources: &mut ResourceManager<A>,
        camera: &Camera,
        sprite: &Sprite,
        position: Vector2,
        scale: Vector2,
        angle: f32,
    ) where
        A: AssetLoader<Texture = D::Texture>,
    {
        let Some(texture) = resources.get_texture(sprite.texture_id()) else {
            error!("Cannot draw sprite, texture missing: {}", sprite.texture_id());
            return;
        };
        let Some(source) = source_rect(texture, sprite) else {
            return;
        };

        let screen = camera.world_to_screen(position);
        let dest = Rectangle {
            x: screen.x,
            y: screen.y,
            width: source.width * scale.x,
            height: source.height * scale.y,
        };
        if !is_visible(&dest, camera.viewport_size()) {
            return;
        }

        let call = DrawCall {
            source,
            dest,
            rotation: angle,
            flip_h: sprite.is_flipped(),
        };
        Self::issue(&mut self.target, texture, &call);
    }

    /// Draw a parallax layer anchored at world `position`.
    ///
    /// On a repeating axis the tile is repeated from just left of (or above)
    /// the screen edge across the whole viewport, phase-locked to the layer
    /// position. On a non-repeating axis a single tile is drawn.
    pub fn draw_parallax<A>(
        &mut self,
        resources: &mut ResourceManager<A>,
        camera: &Camera,
        sprite: &Sprite,
        position: Vector2,
        layer: &ParallaxLayer,
        scale: Vector2,
    ) where
        A: AssetLoader<Texture = D::Texture>,
    {
        let Some(texture) = resources.get_texture(sprite.texture_id()) else {
            error!("Cannot draw parallax layer, texture missing: {}", sprite.texture_id());
            return;
        };
        let Some(source) = source_rect(texture, sprite) else {
            return;
        };

        let tile = Vector2 {
            x: source.width * scale.x,
            y: source.height * scale.y,
        };
        // Keeps the tile count per axis under viewport / MIN_PARALLAX_TILE + 2
        if tile.x < MIN_PARALLAX_TILE || tile.y < MIN_PARALLAX_TILE {
            error!(
                "Invalid parallax tile size {}x{} for {}",
                tile.x,
                tile.y,
                sprite.texture_id()
            );
            return;
        }

        let origin = camera.world_to_screen_with_parallax(position, layer.scroll_factor);
        let viewport = camera.viewport_size();
        let (start_x, end_x) = tile_span(origin.x, tile.x, viewport.x, layer.repeat_x);
        let (start_y, end_y) = tile_span(origin.y, tile.y, viewport.y, layer.repeat_y);

        let mut y = start_y;
        while y < end_y {
            let mut x = start_x;
            while x < end_x {
                let dest = Rectangle {
                    x,
                    y,
                    width: tile.x,
                    height: tile.y,
                };
                if is_visible(&dest, viewport) {
                    let call = DrawCall {
                        source,
                        dest,
                        rotation: 0.0,
                        flip_h: sprite.is_flipped(),
                    };
                    Self::issue(&mut self.target, texture, &call);
                }
                x += tile.x;
            }
            y += tile.y;
        }
    }

    /// Draw a screen-space sprite. No camera transform, no culling.
    ///
    /// `size` overrides the on-screen size; by default the sampled region is
    /// drawn at its native size.
    pub fn draw_ui_sprite<A>(
        &mut self,
        resources: &mut ResourceManager<A>,
        sprite: &Sprite,
        position: Vector2,
        size: Option<Vector2>,
    ) where
        A: AssetLoader<Texture = D::Texture>,
    {
        let Some(texture) = resources.get_texture(sprite.texture_id()) else {
            error!("Cannot draw UI sprite, texture missing: {}", sprite.texture_id());
            return;
        };
        let Some(source) = source_rect(texture, sprite) else {
            return;
        };
        let size = size.unwrap_or(Vector2 {
            x: source.width,
            y: source.height,
        });
        let call = DrawCall {
            source,
            dest: Rectangle {
                x: position.x,
                y: position.y,
                width: size.x,
                height: size.y,
            },
            rotation: 0.0,
            flip_h: sprite.is_flipped(),
        };
        Self::issue(&mut self.target, texture, &call);
    }

    /// Fill the backbuffer with the current draw colour.
    pub fn clear_screen(&mut self) {
        if let Err(e) = self.target.clear(self.draw_color) {
            error!("Failed to clear screen: {}", e);
        }
    }

    pub fn present(&mut self) {
        if let Err(e) = self.target.present() {
            error!("Failed to present frame: {}", e);
        }
    }

    pub fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.draw_color = Color { r, g, b, a };
    }

    /// Same as [`set_draw_color`](Self::set_draw_color) with channels in
    /// `[0, 1]`. Out-of-range values are clamped.
    pub fn set_draw_color_float(&mut self, r: f32, g: f32, b: f32, a: f32) {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.set_draw_color(to_u8(r), to_u8(g), to_u8(b), to_u8(a));
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    fn issue(target: &mut D, texture: &D::Texture, call: &DrawCall) {
        if let Err(e) = target.draw_texture(texture, call) {
            error!("Draw call failed: {}", e);
        }
    }
}

/// Region of `texture` sampled by `sprite`, or `None` (logged) when the
/// sprite's explicit rectangle is degenerate.
fn source_rect<T: NativeTexture>(texture: &T, sprite: &Sprite) -> Option<Rectangle> {
    match sprite.source_rect() {
        Some(rect) if rect.width <= 0.0 || rect.height <= 0.0 => {
            error!(
                "Invalid source rectangle {}x{} for {}",
                rect.width,
                rect.height,
                sprite.texture_id()
            );
            None
        }
        Some(rect) => Some(rect),
        None => {
            let size = texture.size();
            Some(Rectangle {
                x: 0.0,
                y: 0.0,
                width: size.x,
                height: size.y,
            })
        }
    }
}

/// Edge-inclusive overlap of `dest` with `[0, 0] - viewport`.
fn is_visible(dest: &Rectangle, viewport: Vector2) -> bool {
    dest.x + dest.width >= 0.0
        && dest.x <= viewport.x
        && dest.y + dest.height >= 0.0
        && dest.y <= viewport.y
}

/// Start and exclusive end of the tile run on one axis.
fn tile_span(origin: f32, tile: f32, viewport: f32, repeat: bool) -> (f32, f32) {
    if repeat {
        (origin.rem_euclid(tile) - tile, viewport)
    } else {
        (origin, (origin + tile).min(viewport))
    }
}
