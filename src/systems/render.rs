//! Render system.
//!
//! Draws one frame in three passes, each sorted by [`ZIndex`]:
//!
//! 1. parallax background layers ([`ParallaxLayer`] + [`MapPosition`])
//! 2. world sprites ([`MapPosition`]), culled by the renderer
//! 3. HUD sprites ([`ScreenPosition`]), in screen space
//!
//! then presents the backbuffer.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::backend::{AssetLoader, DrawTarget};
use crate::components::mapposition::MapPosition;
use crate::components::parallax::ParallaxLayer;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::screenposition::{ScreenPosition, UiSize};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::camera::Camera;
use crate::resources::renderer::Renderer;
use crate::resources::resourcemanager::ResourceManager;

type LayerItem<'a> = (&'a Sprite, &'a MapPosition, &'a ParallaxLayer, Option<&'a Scale>, Option<&'a ZIndex>);
type SpriteItem<'a> = (
    &'a Sprite,
    &'a MapPosition,
    Option<&'a Scale>,
    Option<&'a Rotation>,
    Option<&'a ZIndex>,
);
type HudItem<'a> = (&'a Sprite, &'a ScreenPosition, Option<&'a UiSize>, Option<&'a ZIndex>);

fn z(z: Option<&ZIndex>) -> ZIndex {
    z.copied().unwrap_or_default()
}

fn scale_of(scale: Option<&Scale>) -> Vector2 {
    scale.copied().unwrap_or_default().scale
}

pub fn render_system<D, A>(
    mut renderer: NonSendMut<Renderer<D>>,
    mut resources: NonSendMut<ResourceManager<A>>,
    camera: Res<Camera>,
    layers: Query<LayerItem>,
    sprites: Query<SpriteItem, Without<ParallaxLayer>>,
    hud: Query<HudItem>,
) where
    D: DrawTarget + 'static,
    A: AssetLoader<Texture = D::Texture> + 'static,
{
    let resources = &mut *resources;
    renderer.clear_screen();

    let mut to_draw: Vec<LayerItem> = layers.iter().collect();
    to_draw.sort_by_key(|(.., zi)| z(*zi));
    for (sprite, pos, layer, scale, _) in to_draw {
        renderer.draw_parallax(resources, &camera, sprite, pos.pos, layer, scale_of(scale));
    }

    let mut to_draw: Vec<SpriteItem> = sprites.iter().collect();
    to_draw.sort_by_key(|(.., zi)| z(*zi));
    for (sprite, pos, scale, rotation, _) in to_draw {
        let angle = rotation.map_or(0.0, |r| r.degrees);
        renderer.draw_sprite(resources, &camera, sprite, pos.pos, scale_of(scale), angle);
    }

    let mut to_draw: Vec<HudItem> = hud.iter().collect();
    to_draw.sort_by_key(|(.., zi)| z(*zi));
    for (sprite, pos, size, _) in to_draw {
        renderer.draw_ui_sprite(resources, sprite, pos.pos, size.map(|s| s.size));
    }

    renderer.present();
}
