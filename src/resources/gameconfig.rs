//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! title = Island
//! width = 1280
//! height = 720
//! resizable = true
//!
//! [graphics]
//! vsync = true
//!
//! [performance]
//! target_fps = 60
//!
//! [audio]
//! music_volume = 0.5
//! sound_volume = 0.5
//!
//! [input_mappings]
//! jump = K, Space
//! attack = J, MouseLeft
//! ```
//!
//! Keys are case-sensitive. Each `[input_mappings]` entry binds an action to a
//! comma-separated list of key or mouse-button names. When the section is
//! present it replaces the default binding table.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};

/// Default safe values for startup
const DEFAULT_TITLE: &str = "Island";
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_RESIZABLE: bool = true;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
const DEFAULT_SOUND_VOLUME: f32 = 0.5;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const INPUT_SECTION: &str = "input_mappings";

const DEFAULT_INPUT_MAPPINGS: &[(&str, &[&str])] = &[
    ("move_left", &["A", "Left"]),
    ("move_right", &["D", "Right"]),
    ("move_up", &["W", "Up"]),
    ("move_down", &["S", "Down"]),
    ("jump", &["K", "Space"]),
    ("attack", &["J", "MouseLeft"]),
    ("pause", &["P", "Escape"]),
];

/// The binding table used when the configuration file has none.
pub fn default_input_mappings() -> BTreeMap<String, Vec<String>> {
    DEFAULT_INPUT_MAPPINGS
        .iter()
        .map(|(action, keys)| {
            (
                action.to_string(),
                keys.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

/// Game configuration resource.
///
/// Stores window settings, frame pacing, audio volumes and the action binding
/// table read by [`InputManager`](crate::resources::input::InputManager).
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window title.
    pub title: String,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Allow the window to be resized.
    pub resizable: bool,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Target frames per second. `0` means unlimited.
    pub target_fps: u32,
    /// Music volume in `[0, 1]`.
    pub music_volume: f32,
    /// Sound effect volume in `[0, 1]`.
    pub sound_volume: f32,
    /// Action name to ordered key/button names.
    pub input_mappings: BTreeMap<String, Vec<String>>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            resizable: DEFAULT_RESIZABLE,
            vsync: DEFAULT_VSYNC,
            target_fps: DEFAULT_TARGET_FPS,
            music_volume: DEFAULT_MUSIC_VOLUME,
            sound_volume: DEFAULT_SOUND_VOLUME,
            input_mappings: default_input_mappings(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new_cs();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new_cs();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load the file, or write the defaults there when it does not exist yet.
    pub fn load_or_create(&mut self) -> Result<(), String> {
        if self.config_path.exists() {
            return self.load_from_file();
        }
        warn!(
            "Config file {:?} not found, writing defaults",
            self.config_path
        );
        self.save_to_file()
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(resizable) = config.getbool("window", "resizable").ok().flatten() {
            self.resizable = resizable;
        }

        // [graphics] section
        if let Some(vsync) = config.getbool("graphics", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [performance] section
        if let Some(fps) = config.getint("performance", "target_fps").ok().flatten() {
            if fps < 0 {
                warn!("Negative target_fps {} in config, using 0 (unlimited)", fps);
                self.target_fps = 0;
            } else {
                self.target_fps = fps as u32;
            }
        }

        // [audio] section
        if let Some(volume) = config.getfloat("audio", "music_volume").ok().flatten() {
            self.music_volume = (volume as f32).clamp(0.0, 1.0);
        }
        if let Some(volume) = config.getfloat("audio", "sound_volume").ok().flatten() {
            self.sound_volume = (volume as f32).clamp(0.0, 1.0);
        }

        // [input_mappings] section
        if let Some(section) = config.get_map_ref().get(INPUT_SECTION) {
            let mappings: BTreeMap<String, Vec<String>> = section
                .iter()
                .map(|(action, keys)| {
                    let keys = keys
                        .as_deref()
                        .unwrap_or_default()
                        .split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect();
                    (action.clone(), keys)
                })
                .collect();
            if mappings.is_empty() {
                warn!("Empty [{}] section, keeping default bindings", INPUT_SECTION);
            } else {
                self.input_mappings = mappings;
            }
        }

        info!(
            "Loaded config: '{}' {}x{} window, resizable={}, vsync={}, fps={}, music={:.2}, sound={:.2}, {} actions",
            self.title,
            self.window_width,
            self.window_height,
            self.resizable,
            self.vsync,
            self.target_fps,
            self.music_volume,
            self.sound_volume,
            self.input_mappings.len()
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new_cs();

        // [window] section
        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "resizable", Some(self.resizable.to_string()));

        // [graphics] section
        config.set("graphics", "vsync", Some(self.vsync.to_string()));

        // [performance] section
        config.set("performance", "target_fps", Some(self.target_fps.to_string()));

        // [audio] section
        config.set("audio", "music_volume", Some(self.music_volume.to_string()));
        config.set("audio", "sound_volume", Some(self.sound_volume.to_string()));

        // [input_mappings] section
        for (action, keys) in &self.input_mappings {
            config.set(INPUT_SECTION, action, Some(keys.join(", ")));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
