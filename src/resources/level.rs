//! Level description.
//!
//! A [`Level`] lists what a scene needs: parallax background layers, the
//! player sprite, HUD sprites, and the fonts and audio clips to preload. It is
//! read from JSON; every field except the player may be omitted.
//!
//! ```json
//! {
//!   "bounds": { "x": 0, "y": 0, "width": 3200, "height": 720 },
//!   "layers": [
//!     { "texture": "assets/gfx/sky.png", "scroll_x": 0.0, "repeat_x": true, "z": -20 }
//!   ],
//!   "player": { "texture": "assets/gfx/player.png", "x": 200, "y": 500, "speed": 240 },
//!   "hud": [ { "texture": "assets/gfx/heart.png", "x": 16, "y": 16 } ],
//!   "fonts": [ { "path": "assets/fonts/hud.ttf", "size": 16 } ],
//!   "action_sounds": { "jump": "assets/sfx/jump.wav" },
//!   "music": "assets/music/theme.ogg"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::Rectangle;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle as written in level files.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RectData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<RectData> for Rectangle {
    fn from(r: RectData) -> Self {
        Rectangle {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

fn one() -> f32 {
    1.0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerData {
    pub texture: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub scroll_x: f32,
    #[serde(default)]
    pub scroll_y: f32,
    #[serde(default)]
    pub repeat_x: bool,
    #[serde(default)]
    pub repeat_y: bool,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default)]
    pub z: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub texture: String,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    #[serde(default)]
    pub source: Option<RectData>,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default)]
    pub z: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HudData {
    pub texture: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub z: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FontData {
    pub path: String,
    pub size: i32,
}

/// Scene description, kept in the world as a resource after setup.
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Camera limit rectangle in world units.
    #[serde(default)]
    pub bounds: Option<RectData>,
    #[serde(default)]
    pub layers: Vec<LayerData>,
    pub player: PlayerData,
    #[serde(default)]
    pub hud: Vec<HudData>,
    #[serde(default)]
    pub fonts: Vec<FontData>,
    /// Extra clips to preload.
    #[serde(default)]
    pub sounds: Vec<String>,
    /// Action name to the sound played when it is pressed.
    #[serde(default)]
    pub action_sounds: BTreeMap<String, String>,
    #[serde(default)]
    pub music: Option<String>,
}

impl Level {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse level: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        let level = Self::from_json(&text)?;
        info!(
            "Loaded level {:?}: {} layers, {} hud sprites",
            path,
            level.layers.len(),
            level.hud.len()
        );
        Ok(level)
    }
}

impl Default for Level {
    /// The built-in demo scene.
    fn default() -> Self {
        let layer = |texture: &str, scroll: f32, y: f32, z: i32| LayerData {
            texture: texture.to_string(),
            x: 0.0,
            y,
            scroll_x: scroll,
            scroll_y: 0.0,
            repeat_x: true,
            repeat_y: false,
            scale: 1.0,
            z,
        };
        Self {
            bounds: Some(RectData {
                x: 0.0,
                y: 0.0,
                width: 3200.0,
                height: 720.0,
            }),
            layers: vec![
                layer("assets/gfx/sky.png", 0.0, 0.0, -30),
                layer("assets/gfx/hills.png", 0.3, 360.0, -20),
                layer("assets/gfx/trees.png", 0.6, 480.0, -10),
            ],
            player: PlayerData {
                texture: "assets/gfx/player.png".to_string(),
                x: 200.0,
                y: 560.0,
                speed: 240.0,
                source: None,
                scale: 2.0,
                z: 10,
            },
            hud: vec![HudData {
                texture: "assets/gfx/heart.png".to_string(),
                x: 16.0,
                y: 16.0,
                width: None,
                height: None,
                z: 0,
            }],
            fonts: vec![FontData {
                path: "assets/fonts/hud.ttf".to_string(),
                size: 16,
            }],
            sounds: Vec::new(),
            action_sounds: BTreeMap::from([
                ("jump".to_string(), "assets/sfx/jump.wav".to_string()),
                ("attack".to_string(), "assets/sfx/attack.wav".to_string()),
            ]),
            music: Some("assets/music/theme.ogg".to_string()),
        }
    }
}
