//! Resource integration tests: config file → input bindings, and the
//! resource manager lifecycle as seen through the renderer.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use islandengine::backend::headless::{HeadlessAssets, RecordingTarget};
use islandengine::backend::keynames::{mouse_button_from_name, scancode_from_name};
use islandengine::components::sprite::Sprite;
use islandengine::events::input::InputEvent;
use islandengine::resources::camera::Camera;
use islandengine::resources::gameconfig::GameConfig;
use islandengine::resources::input::{ActionState, InputManager};
use islandengine::resources::renderer::Renderer;
use islandengine::resources::resourcemanager::ResourceManager;

fn config_world(ini: &str) -> (World, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    std::fs::write(&path, ini).unwrap();

    let mut config = GameConfig::with_path(&path);
    config.load_from_file().unwrap();
    let mut world = World::new();
    world.insert_resource(config);
    (world, dir)
}

#[test]
fn test_bindings_from_config_file_drive_actions() {
    let (world, _dir) = config_world(
        "[input_mappings]\ndash = Left Shift, MouseRight\nfire = F, MouseLeft\n",
    );
    let mut input = InputManager::from_world(&world).unwrap();

    input.update([InputEvent::KeyDown {
        code: scancode_from_name("Left Shift").unwrap(),
        repeat: false,
    }]);
    assert!(input.is_action_pressed("dash"));
    assert!(!input.is_action_down("fire"));

    let right = mouse_button_from_name("MouseRight").unwrap();
    input.update([InputEvent::MouseButtonUp {
        button: right,
        position: Vector2 { x: 1.0, y: 2.0 },
    }]);
    assert!(input.is_action_released("dash"));
    // MouseRightClick is synthesised and shares the button
    assert!(input.is_action_released("MouseRightClick"));

    input.update([]);
    assert_eq!(input.action_state("dash"), Some(ActionState::Inactive));
}

#[test]
fn test_default_config_file_round_trip_keeps_jump_on_space() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    GameConfig::with_path(&path).load_or_create().unwrap();

    let (world, _dir) = config_world(&std::fs::read_to_string(&path).unwrap());
    let mut input = InputManager::from_world(&world).unwrap();
    input.update([InputEvent::KeyDown {
        code: scancode_from_name("Space").unwrap(),
        repeat: false,
    }]);
    assert!(input.is_action_pressed("jump"));
}

fn renderer_setup() -> (Renderer<RecordingTarget>, ResourceManager<HeadlessAssets>, Camera) {
    let mut assets = HeadlessAssets::new();
    assets.register_texture("crate.png", 24.0, 24.0);
    (
        Renderer::new(RecordingTarget::new()),
        ResourceManager::new(assets),
        Camera::new(Vector2 { x: 100.0, y: 100.0 }, Vector2 { x: 0.0, y: 0.0 }, None),
    )
}

#[test]
fn test_first_draw_loads_and_later_draws_hit_the_cache() {
    let (mut renderer, mut rm, camera) = renderer_setup();
    let sprite = Sprite::new("crate.png");
    let origin = Vector2 { x: 10.0, y: 10.0 };
    let one = Vector2 { x: 1.0, y: 1.0 };

    renderer.draw_sprite(&mut rm, &camera, &sprite, origin, one, 0.0);
    renderer.draw_sprite(&mut rm, &camera, &sprite, origin, one, 0.0);
    assert_eq!(rm.loader().load_count(), 1);
    assert_eq!(renderer.target().draws().len(), 2);
}

#[test]
fn test_unload_then_draw_reloads() {
    let (mut renderer, mut rm, camera) = renderer_setup();
    let sprite = Sprite::new("crate.png");
    let at = Vector2 { x: 0.0, y: 0.0 };
    let one = Vector2 { x: 1.0, y: 1.0 };

    renderer.draw_sprite(&mut rm, &camera, &sprite, at, one, 0.0);
    assert!(rm.unload_texture("crate.png"));
    assert_eq!(rm.loader().live_handles(), 0);

    renderer.draw_sprite(&mut rm, &camera, &sprite, at, one, 0.0);
    assert_eq!(rm.loader().load_count(), 2);
    assert_eq!(rm.loader().live_handles(), 1);
}

#[test]
fn test_culled_sprite_still_resolves_texture() {
    let (mut renderer, mut rm, camera) = renderer_setup();
    let sprite = Sprite::new("crate.png");
    let far = Vector2 { x: -1000.0, y: 0.0 };
    renderer.draw_sprite(&mut rm, &camera, &sprite, far, Vector2 { x: 1.0, y: 1.0 }, 0.0);

    assert!(renderer.target().draws().is_empty());
    assert_eq!(rm.texture_count(), 1);
}
