//! Scene setup, frame schedule and teardown.
//!
//! Glue between the core resources and a running application:
//!
//! - [`setup_scene`] preloads a [`Level`]'s assets and spawns its entities
//! - [`build_schedule`] wires the per-frame systems in order
//! - [`run_frame`] advances time and runs the schedule once
//! - [`shutdown`] tears native resources down in dependency order
//!
//! Everything is generic over the backend so the same code drives the raylib
//! window and the headless backend used in tests.

use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::backend::{AssetLoader, DrawTarget, EventSource};
use crate::components::actionsound::ActionSounds;
use crate::components::inputcontrolled::{CameraTarget, InputControlled};
use crate::components::mapposition::MapPosition;
use crate::components::parallax::ParallaxLayer;
use crate::components::scale::Scale;
use crate::components::screenposition::{ScreenPosition, UiSize};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::error::SetupError;
use crate::resources::camera::Camera;
use crate::resources::level::Level;
use crate::resources::renderer::Renderer;
use crate::resources::resourcemanager::ResourceManager;
use crate::systems::audio::action_sound_system;
use crate::systems::camera::camera_follow_system;
use crate::systems::input::update_input_system;
use crate::systems::movement::player_movement_system;
use crate::systems::render::render_system;
use crate::systems::time::update_world_time;

/// Preload every asset `level` names, spawn its entities and keep the level
/// as a resource.
///
/// Requires the `ResourceManager<A>` (non-send) and [`Camera`] resources.
/// Assets that fail to load are logged by the caches and simply not drawn.
pub fn setup_scene<A: AssetLoader + 'static>(
    world: &mut World,
    level: Level,
) -> Result<(), SetupError> {
    let hud_sizes: Vec<Vector2> = {
        let Some(mut resources) = world.get_non_send_resource_mut::<ResourceManager<A>>() else {
            return Err(SetupError::MissingCollaborator("ResourceManager"));
        };

        for layer in &level.layers {
            resources.load_texture(&layer.texture);
        }
        resources.load_texture(&level.player.texture);
        for font in &level.fonts {
            resources.load_font(&font.path, font.size);
        }
        for sound in level.sounds.iter().chain(level.action_sounds.values()) {
            resources.load_sound(sound);
        }
        if let Some(music) = &level.music
            && resources.load_music(music).is_some()
        {
            resources.play_music(music);
        }

        // A HUD entry with only one dimension keeps the texture's other one
        level
            .hud
            .iter()
            .map(|hud| {
                let native = resources.texture_size(&hud.texture);
                Vector2 {
                    x: hud.width.unwrap_or(native.x),
                    y: hud.height.unwrap_or(native.y),
                }
            })
            .collect()
    };

    {
        let Some(mut camera) = world.get_resource_mut::<Camera>() else {
            return Err(SetupError::MissingCollaborator("Camera"));
        };
        camera.set_limit_bounds(level.bounds.map(Into::into));
    }

    for layer in &level.layers {
        world.spawn((
            Sprite::new(&layer.texture),
            MapPosition::new(layer.x, layer.y),
            ParallaxLayer::new(layer.scroll_x, layer.scroll_y)
                .with_repeat(layer.repeat_x, layer.repeat_y),
            Scale::uniform(layer.scale),
            ZIndex(layer.z),
        ));
    }

    let player = &level.player;
    let mut sprite = Sprite::new(&player.texture);
    if let Some(source) = player.source {
        sprite = sprite.with_source_rect(source.into());
    }
    let sounds = level
        .action_sounds
        .iter()
        .fold(ActionSounds::new(), |sounds, (action, path)| {
            sounds.with(action.as_str(), path.as_str())
        });
    world.spawn((
        sprite,
        MapPosition::new(player.x, player.y),
        InputControlled::new(player.speed),
        CameraTarget,
        Scale::uniform(player.scale),
        ZIndex(player.z),
        sounds,
    ));

    for (hud, size) in level.hud.iter().zip(hud_sizes) {
        let mut entity = world.spawn((
            Sprite::new(&hud.texture),
            ScreenPosition::new(hud.x, hud.y),
            ZIndex(hud.z),
        ));
        if hud.width.is_some() || hud.height.is_some() {
            entity.insert(UiSize::new(size.x, size.y));
        }
    }

    info!(
        "Scene ready: {} layers, {} hud sprites",
        level.layers.len(),
        level.hud.len()
    );
    world.insert_resource(level);
    Ok(())
}

/// The per-frame schedule: input, then gameplay, then camera, then drawing.
pub fn build_schedule<D, A, E>() -> Schedule
where
    D: DrawTarget + 'static,
    A: AssetLoader<Texture = D::Texture> + 'static,
    E: EventSource + 'static,
{
    let mut update = Schedule::default();
    update.add_systems(update_input_system::<E>);
    update.add_systems(player_movement_system.after(update_input_system::<E>));
    update.add_systems(action_sound_system::<A>.after(update_input_system::<E>));
    update.add_systems(camera_follow_system.after(player_movement_system));
    update.add_systems(
        render_system::<D, A>
            .after(camera_follow_system)
            .after(action_sound_system::<A>),
    );
    update
}

/// Advance time by `dt` seconds and run one frame.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Release native resources in dependency order.
///
/// The renderer goes first, then the resource manager (destroying every
/// cached handle, then the loader), then the window handle if the world
/// holds one.
pub fn shutdown<D, A>(world: &mut World)
where
    D: DrawTarget + 'static,
    A: AssetLoader + 'static,
{
    if world.remove_non_send_resource::<Renderer<D>>().is_none() {
        warn!("Shutdown: no renderer to release");
    }
    if world
        .remove_non_send_resource::<ResourceManager<A>>()
        .is_none()
    {
        warn!("Shutdown: no resource manager to release");
    }
    if world
        .remove_non_send_resource::<raylib::RaylibHandle>()
        .is_some()
    {
        info!("Window closed");
    }
    info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessAssets;
    use crate::resources::level::{HudData, LayerData, PlayerData};

    fn level() -> Level {
        Level {
            layers: vec![LayerData {
                texture: "sky.png".to_string(),
                x: 0.0,
                y: 0.0,
                scroll_x: 0.0,
                scroll_y: 0.0,
                repeat_x: true,
                repeat_y: false,
                scale: 1.0,
                z: -1,
            }],
            player: PlayerData {
                texture: "player.png".to_string(),
                x: 50.0,
                y: 60.0,
                speed: 100.0,
                source: None,
                scale: 1.0,
                z: 1,
            },
            hud: vec![HudData {
                texture: "heart.png".to_string(),
                x: 4.0,
                y: 4.0,
                width: Some(20.0),
                height: None,
                z: 0,
            }],
            fonts: vec![],
            sounds: vec!["jump.wav".to_string()],
            music: Some("theme.ogg".to_string()),
            ..Level::default()
        }
    }

    fn make_world() -> World {
        let mut assets = HeadlessAssets::new();
        assets.register_texture("sky.png", 640.0, 360.0);
        assets.register_texture("player.png", 16.0, 16.0);
        assets.register_texture("heart.png", 8.0, 12.0);
        assets.register_audio("jump.wav");
        assets.register_audio("theme.ogg");

        let mut world = World::new();
        world.insert_non_send_resource(ResourceManager::new(assets));
        world.insert_resource(Camera::new(
            Vector2 { x: 320.0, y: 180.0 },
            Vector2 { x: 0.0, y: 0.0 },
            None,
        ));
        world
    }

    #[test]
    fn test_setup_scene_preloads_and_spawns() {
        let mut world = make_world();
        setup_scene::<HeadlessAssets>(&mut world, level()).unwrap();

        let resources = world.non_send_resource::<ResourceManager<HeadlessAssets>>();
        assert_eq!(resources.texture_count(), 3);
        // the default action sounds are not registered, so only jump.wav and theme.ogg
        assert_eq!(resources.audio_count(), 2);
        assert_eq!(resources.loader().played(), ["theme.ogg"]);

        let mut players = world.query_filtered::<&MapPosition, With<CameraTarget>>();
        let player = players.single(&world).unwrap();
        assert_eq!((player.pos.x, player.pos.y), (50.0, 60.0));

        let mut hud = world.query::<(&ScreenPosition, &UiSize)>();
        let (_, size) = hud.single(&world).unwrap();
        assert_eq!((size.size.x, size.size.y), (20.0, 12.0));

        assert_eq!(world.query::<&ParallaxLayer>().iter(&world).count(), 1);
        assert!(world.get_resource::<Level>().is_some());
    }

    #[test]
    fn test_setup_scene_applies_bounds() {
        let mut world = make_world();
        setup_scene::<HeadlessAssets>(&mut world, level()).unwrap();
        let bounds = world.resource::<Camera>().limit_bounds().unwrap();
        assert_eq!(bounds.width, 3200.0);
    }

    #[test]
    fn test_setup_scene_requires_collaborators() {
        let mut world = World::new();
        assert!(matches!(
            setup_scene::<HeadlessAssets>(&mut world, level()),
            Err(SetupError::MissingCollaborator("ResourceManager"))
        ));

        world.insert_non_send_resource(ResourceManager::new(HeadlessAssets::new()));
        assert!(matches!(
            setup_scene::<HeadlessAssets>(&mut world, level()),
            Err(SetupError::MissingCollaborator("Camera"))
        ));
    }

    #[test]
    fn test_shutdown_releases_every_handle() {
        let mut world = make_world();
        setup_scene::<HeadlessAssets>(&mut world, level()).unwrap();
        let live = world
            .non_send_resource::<ResourceManager<HeadlessAssets>>()
            .loader()
            .live_counter();
        assert!(live.get() > 0);

        shutdown::<crate::backend::headless::RecordingTarget, HeadlessAssets>(&mut world);
        assert_eq!(live.get(), 0);
        assert!(
            world
                .get_non_send_resource::<ResourceManager<HeadlessAssets>>()
                .is_none()
        );
    }
}
