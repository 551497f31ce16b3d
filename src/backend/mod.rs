//! Native seams.
//!
//! The core never talks to a windowing, audio or drawing library directly.
//! It goes through the traits defined here:
//!
//! - [`AssetLoader`] – decodes textures, audio clips and fonts into owned
//!   native handles (consumed by [`ResourceManager`](crate::resources::resourcemanager::ResourceManager))
//! - [`NativeTexture`] – size query on a loaded texture
//! - [`DrawTarget`] – the backbuffer the [`Renderer`](crate::resources::renderer::Renderer) draws into
//! - [`EventSource`] – produces the raw [`InputEvent`]s consumed by the
//!   [`InputManager`](crate::resources::input::InputManager)
//!
//! Implementations:
//! - [`raylib`] – the real platform backend
//! - [`headless`] – in-memory backend used by tests and tooling
//! - [`keynames`] – platform key-name table used when building input bindings

pub mod headless;
pub mod keynames;
pub mod raylib;

use ::raylib::prelude::{Color, Rectangle, Vector2};

use crate::events::input::{InputCode, InputEvent};

/// Which flavour of audio clip is being loaded.
///
/// Both kinds share one cache; the kind only lets the backend pick a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioKind {
    Sound,
    Music,
}

/// A loaded texture that can report its native extent.
pub trait NativeTexture {
    /// Width and height in pixels.
    fn size(&self) -> Vector2;
}

/// Decodes assets into owned native handles.
///
/// Handles release their native resources in `Drop`. The loader itself must
/// outlive every handle it produced; [`ResourceManager`](crate::resources::resourcemanager::ResourceManager)
/// guarantees this through field order.
pub trait AssetLoader {
    type Texture: NativeTexture;
    type Audio;
    type Font;

    fn load_texture(&mut self, path: &str) -> Result<Self::Texture, String>;
    fn load_audio(&mut self, path: &str, kind: AudioKind) -> Result<Self::Audio, String>;
    fn load_font(&mut self, path: &str, size: i32) -> Result<Self::Font, String>;

    /// Start playback of an already loaded clip.
    fn play_audio(&mut self, audio: &Self::Audio) -> Result<(), String>;
}

/// One textured-rectangle draw primitive in screen space.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    /// Region of the texture to sample.
    pub source: Rectangle,
    /// Destination rectangle on the backbuffer.
    pub dest: Rectangle,
    /// Clockwise rotation in degrees about the centre of `dest`.
    pub rotation: f32,
    /// Mirror the sampled region horizontally.
    pub flip_h: bool,
}

/// The native backbuffer.
pub trait DrawTarget {
    type Texture: NativeTexture;

    fn draw_texture(&mut self, texture: &Self::Texture, call: &DrawCall) -> Result<(), String>;
    fn clear(&mut self, color: Color) -> Result<(), String>;
    fn present(&mut self) -> Result<(), String>;
}

/// Producer of raw device events, drained once per frame.
pub trait EventSource {
    /// Collect this frame's events.
    ///
    /// `watched` lists every device code currently bound to an action. Polling
    /// backends (raylib has no event queue) use it to know which keys to query;
    /// queue-based backends may ignore it.
    fn poll(&mut self, watched: &[InputCode]) -> Vec<InputEvent>;
}
