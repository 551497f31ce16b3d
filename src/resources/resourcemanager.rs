//! Resource manager façade.
//!
//! [`ResourceManager`] groups one [`ResourceCache`] per asset family behind a
//! single object and binds them to the platform [`AssetLoader`]:
//!
//! - textures keyed by path
//! - audio clips keyed by path, shared by sounds and music
//! - fonts keyed by `(path, size)`, see [`FontKey`]
//!
//! The manager holds native handles, which are not `Send`, so it is inserted
//! into the world as a non-send resource. The caches are declared before the
//! loader so every handle is destroyed before the loader (and the audio device
//! it owns) goes away.

use std::fmt;

use log::{error, info, trace};
use raylib::prelude::Vector2;

use crate::backend::{AssetLoader, AudioKind, NativeTexture};
use crate::resources::cache::ResourceCache;

/// Cache identity of a font: the same file rasterised at two sizes is two
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub path: String,
    pub size: i32,
}

impl FontKey {
    pub fn new(path: impl Into<String>, size: i32) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.size)
    }
}

/// Owner of every loaded asset.
pub struct ResourceManager<A: AssetLoader> {
    textures: ResourceCache<String, A::Texture>,
    audio: ResourceCache<String, A::Audio>,
    fonts: ResourceCache<FontKey, A::Font>,
    // Must stay last: dropped after the caches.
    loader: A,
}

impl<A: AssetLoader> ResourceManager<A> {
    pub fn new(loader: A) -> Self {
        trace!("ResourceManager created");
        Self {
            textures: ResourceCache::new("texture"),
            audio: ResourceCache::new("audio"),
            fonts: ResourceCache::new("font"),
            loader,
        }
    }

    // Textures

    pub fn load_texture(&mut self, path: &str) -> Option<&A::Texture> {
        let loader = &mut self.loader;
        self.textures.load(path, |p| loader.load_texture(p))
    }

    pub fn get_texture(&mut self, path: &str) -> Option<&A::Texture> {
        let loader = &mut self.loader;
        self.textures.get(path, |p| loader.load_texture(p))
    }

    pub fn unload_texture(&mut self, path: &str) -> bool {
        self.textures.unload(path)
    }

    /// Native size of the texture at `path`, loading it on a cold query.
    ///
    /// Returns a zero vector when the texture cannot be loaded.
    pub fn texture_size(&mut self, path: &str) -> Vector2 {
        match self.get_texture(path) {
            Some(texture) => texture.size(),
            None => {
                error!("Cannot query size of missing texture: {}", path);
                Vector2 { x: 0.0, y: 0.0 }
            }
        }
    }

    pub fn clear_textures(&mut self) {
        self.textures.clear();
    }

    // Sounds and music share the audio cache

    pub fn load_sound(&mut self, path: &str) -> Option<&A::Audio> {
        self.load_audio(path, AudioKind::Sound)
    }

    pub fn get_sound(&mut self, path: &str) -> Option<&A::Audio> {
        self.get_audio(path, AudioKind::Sound)
    }

    pub fn unload_sound(&mut self, path: &str) -> bool {
        self.audio.unload(path)
    }

    /// Clears the whole audio cache, music included.
    pub fn clear_sounds(&mut self) {
        self.audio.clear();
    }

    pub fn load_music(&mut self, path: &str) -> Option<&A::Audio> {
        self.load_audio(path, AudioKind::Music)
    }

    pub fn get_music(&mut self, path: &str) -> Option<&A::Audio> {
        self.get_audio(path, AudioKind::Music)
    }

    pub fn unload_music(&mut self, path: &str) -> bool {
        self.audio.unload(path)
    }

    /// Clears the whole audio cache, sounds included.
    pub fn clear_music(&mut self) {
        self.audio.clear();
    }

    fn load_audio(&mut self, path: &str, kind: AudioKind) -> Option<&A::Audio> {
        let loader = &mut self.loader;
        self.audio.load(path, |p| loader.load_audio(p, kind))
    }

    fn get_audio(&mut self, path: &str, kind: AudioKind) -> Option<&A::Audio> {
        let loader = &mut self.loader;
        self.audio.get(path, |p| loader.load_audio(p, kind))
    }

    /// Get-or-load the clip at `path` as a sound effect and start it.
    ///
    /// Returns `false` when the clip is unavailable or playback fails.
    pub fn play_sound(&mut self, path: &str) -> bool {
        self.play(path, AudioKind::Sound)
    }

    /// Get-or-load the clip at `path` as music and start it.
    pub fn play_music(&mut self, path: &str) -> bool {
        self.play(path, AudioKind::Music)
    }

    fn play(&mut self, path: &str, kind: AudioKind) -> bool {
        let loader = &mut self.loader;
        let Some(clip) = self.audio.get(path, |p| loader.load_audio(p, kind)) else {
            return false;
        };
        match self.loader.play_audio(clip) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to play {:?} '{}': {}", kind, path, e);
                false
            }
        }
    }

    // Fonts

    pub fn load_font(&mut self, path: &str, size: i32) -> Option<&A::Font> {
        let key = Self::font_key(path, size)?;
        let loader = &mut self.loader;
        self.fonts.load(&key, |k| loader.load_font(&k.path, k.size))
    }

    pub fn get_font(&mut self, path: &str, size: i32) -> Option<&A::Font> {
        let key = Self::font_key(path, size)?;
        let loader = &mut self.loader;
        self.fonts.get(&key, |k| loader.load_font(&k.path, k.size))
    }

    pub fn unload_font(&mut self, path: &str, size: i32) -> bool {
        match Self::font_key(path, size) {
            Some(key) => self.fonts.unload(&key),
            None => false,
        }
    }

    pub fn clear_fonts(&mut self) {
        self.fonts.clear();
    }

    fn font_key(path: &str, size: i32) -> Option<FontKey> {
        if path.is_empty() {
            error!("Font path is empty");
            return None;
        }
        if size <= 0 {
            error!("Invalid font size {} for {}", size, path);
            return None;
        }
        Some(FontKey::new(path, size))
    }

    /// Destroy every cached handle of every family.
    pub fn clear(&mut self) {
        self.clear_textures();
        self.audio.clear();
        self.clear_fonts();
        info!("All resources cleared");
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn audio_count(&self) -> usize {
        self.audio.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Read-only texture lookup. Never loads.
    pub fn peek_texture(&self, path: &str) -> Option<&A::Texture> {
        self.textures.peek(path)
    }

    pub fn loader(&self) -> &A {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut A {
        &mut self.loader
    }
}

impl<A: AssetLoader> Drop for ResourceManager<A> {
    fn drop(&mut self) {
        self.clear();
    }
}
