//! Island Engine main entry point.
//!
//! A 2D game engine runtime written in Rust using:
//! - **raylib** for windowing, graphics, audio and input
//! - **bevy_ecs** for the entity-component-system frame loop
//!
//! This executable opens a window and runs a small side-scrolling scene: a
//! player moved with the `move_*` actions, parallax background layers, a HUD
//! sprite and action-bound sound effects.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (written with defaults when missing)
//! 2. Open the raylib window and audio device
//! 3. Build the resource manager, renderer, camera and input manager
//! 4. Preload the level's assets and spawn its entities
//! 5. Run the schedule every frame until the window is closed
//! 6. Release the renderer, the cached assets and the window, in that order
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level assets/levels/demo.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::Vector2;

use islandengine::backend::raylib::{RaylibAssets, RaylibDrawTarget, RaylibEventSource};
use islandengine::error::SetupError;
use islandengine::game::{build_schedule, run_frame, setup_scene, shutdown};
use islandengine::resources::camera::Camera;
use islandengine::resources::gameconfig::GameConfig;
use islandengine::resources::input::InputManager;
use islandengine::resources::level::Level;
use islandengine::resources::renderer::Renderer;
use islandengine::resources::resourcemanager::ResourceManager;
use islandengine::resources::worldtime::WorldTime;

/// Island Engine 2D
#[derive(Parser)]
#[command(version, about = "Island Engine 2D runtime")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level description (JSON) to load instead of the built-in demo scene.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    write_default_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write defaults and quit (no window/audio needed)
    if cli.write_default_config {
        let config = GameConfig::with_path(&cli.config);
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", cli.config.display());
        return;
    }

    if let Err(e) = run(&cli) {
        log::error!("Startup failed: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    log::info!("Hello, world! This is the Island Engine!");

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_or_create() {
        log::warn!("{}; using defaults", e);
    }

    let level = match &cli.level {
        Some(path) => Level::load_from_file(path).unwrap_or_else(|e| {
            log::error!("{}; using the built-in level", e);
            Level::default()
        }),
        None => Level::default(),
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title(&config.title);
    if config.resizable {
        builder.resizable();
    }
    if config.vsync {
        builder.vsync();
    }
    // Declared before the world so it is dropped after it on early returns
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit, quitting goes through the window close event
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(Camera::new(
        Vector2 {
            x: window_width as f32,
            y: window_height as f32,
        },
        Vector2 { x: 0.0, y: 0.0 },
        None,
    ));

    let assets = RaylibAssets::new(config.sound_volume, config.music_volume)?;
    world.insert_non_send_resource(ResourceManager::new(assets));
    world.insert_non_send_resource(RaylibDrawTarget::new(&thread));
    let renderer = Renderer::<RaylibDrawTarget>::from_world::<RaylibAssets>(&mut world)?;
    world.insert_non_send_resource(renderer);
    world.insert_non_send_resource(RaylibEventSource::new(&thread));

    world.insert_resource(config);
    let input = InputManager::from_world(&world)?;
    world.insert_resource(input);

    setup_scene::<RaylibAssets>(&mut world, level)?;
    world.insert_non_send_resource(rl);

    let mut update = build_schedule::<RaylibDrawTarget, RaylibAssets, RaylibEventSource>();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world.resource::<InputManager>().should_quit() {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        run_frame(&mut world, &mut update, dt);
    }

    shutdown::<RaylibDrawTarget, RaylibAssets>(&mut world);
    Ok(())
}
