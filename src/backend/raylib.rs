//! raylib platform backend.
//!
//! Talks to raylib through its C API (`raylib::ffi`) so the core can own its
//! handles outright instead of borrowing them from a `RaylibHandle`:
//!
//! - [`TextureHandle`], [`SoundHandle`], [`FontHandle`] wrap raw raylib
//!   objects and unload them in `Drop`
//! - [`RaylibAssets`] owns the audio device and decodes files into handles
//! - [`RaylibDrawTarget`] draws into the window backbuffer
//! - [`RaylibEventSource`] polls the keys and buttons bound to actions
//!
//! All of these require an open window (created with `raylib::init()`) and
//! must stay on the thread that opened it.

use std::ffi::CString;
use std::ptr;

use ::raylib::RaylibThread;
use ::raylib::ffi;
use ::raylib::prelude::{Color, Rectangle, Vector2};
use log::{info, trace};

use super::{AssetLoader, AudioKind, DrawCall, DrawTarget, EventSource, NativeTexture};
use crate::error::SetupError;
use crate::events::input::{InputCode, InputEvent};

fn c_path(path: &str) -> Result<CString, String> {
    CString::new(path).map_err(|e| format!("invalid path '{}': {}", path, e))
}

fn ffi_rect(r: Rectangle) -> ffi::Rectangle {
    ffi::Rectangle {
        x: r.x,
        y: r.y,
        width: r.width,
        height: r.height,
    }
}

fn ffi_color(c: Color) -> ffi::Color {
    ffi::Color {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

/// GPU texture, unloaded on drop.
pub struct TextureHandle(ffi::Texture2D);

impl NativeTexture for TextureHandle {
    fn size(&self) -> Vector2 {
        Vector2 {
            x: self.0.width as f32,
            y: self.0.height as f32,
        }
    }
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        unsafe { ffi::UnloadTexture(self.0) }
    }
}

/// Decoded audio clip, unloaded on drop.
pub struct SoundHandle(ffi::Sound);

impl Drop for SoundHandle {
    fn drop(&mut self) {
        unsafe { ffi::UnloadSound(self.0) }
    }
}

/// Rasterised font atlas, unloaded on drop.
pub struct FontHandle(ffi::Font);

impl FontHandle {
    pub fn base_size(&self) -> i32 {
        self.0.baseSize
    }
}

impl Drop for FontHandle {
    fn drop(&mut self) {
        unsafe { ffi::UnloadFont(self.0) }
    }
}

/// Asset loader owning the raylib audio device.
///
/// Must be dropped after every handle it created;
/// [`ResourceManager`](crate::resources::resourcemanager::ResourceManager)
/// ensures this.
#[derive(Debug)]
pub struct RaylibAssets {
    sound_volume: f32,
    music_volume: f32,
}

impl RaylibAssets {
    /// Open the audio device. Volumes are applied to every clip loaded
    /// afterwards according to its [`AudioKind`].
    pub fn new(sound_volume: f32, music_volume: f32) -> Result<Self, SetupError> {
        unsafe {
            ffi::InitAudioDevice();
            if !ffi::IsAudioDeviceReady() {
                return Err(SetupError::AudioDevice);
            }
        }
        info!("Audio device initialized");
        Ok(Self {
            sound_volume,
            music_volume,
        })
    }
}

impl Drop for RaylibAssets {
    fn drop(&mut self) {
        unsafe { ffi::CloseAudioDevice() }
        trace!("Audio device closed");
    }
}

impl AssetLoader for RaylibAssets {
    type Texture = TextureHandle;
    type Audio = SoundHandle;
    type Font = FontHandle;

    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, String> {
        let c_path = c_path(path)?;
        let texture = unsafe { ffi::LoadTexture(c_path.as_ptr()) };
        if texture.id == 0 {
            return Err("raylib could not load the image".to_string());
        }
        Ok(TextureHandle(texture))
    }

    fn load_audio(&mut self, path: &str, kind: AudioKind) -> Result<SoundHandle, String> {
        let c_path = c_path(path)?;
        let sound = unsafe { ffi::LoadSound(c_path.as_ptr()) };
        if sound.stream.buffer.is_null() {
            return Err("raylib could not decode the audio file".to_string());
        }
        let volume = match kind {
            AudioKind::Sound => self.sound_volume,
            AudioKind::Music => self.music_volume,
        };
        unsafe { ffi::SetSoundVolume(sound, volume) };
        Ok(SoundHandle(sound))
    }

    fn load_font(&mut self, path: &str, size: i32) -> Result<FontHandle, String> {
        let c_path = c_path(path)?;
        // null codepoints selects the default ASCII set
        let font = unsafe { ffi::LoadFontEx(c_path.as_ptr(), size, ptr::null_mut(), 0) };
        if font.texture.id == 0 || font.glyphs.is_null() {
            return Err("raylib could not load the font".to_string());
        }
        Ok(FontHandle(font))
    }

    fn play_audio(&mut self, audio: &SoundHandle) -> Result<(), String> {
        unsafe { ffi::PlaySound(audio.0) };
        Ok(())
    }
}

/// The window backbuffer.
///
/// A frame is opened lazily by the first clear or draw and closed by
/// [`present`](DrawTarget::present).
#[derive(Debug)]
pub struct RaylibDrawTarget {
    drawing: bool,
}

impl RaylibDrawTarget {
    /// Taking the thread token ties the target to the thread owning the window.
    pub fn new(_thread: &RaylibThread) -> Self {
        Self { drawing: false }
    }

    fn begin(&mut self) {
        if !self.drawing {
            unsafe { ffi::BeginDrawing() };
            self.drawing = true;
        }
    }
}

impl DrawTarget for RaylibDrawTarget {
    type Texture = TextureHandle;

    fn draw_texture(&mut self, texture: &TextureHandle, call: &DrawCall) -> Result<(), String> {
        self.begin();
        let mut source = call.source;
        if call.flip_h {
            source.width = -source.width;
        }
        // rotate about the centre of the destination
        let origin = ffi::Vector2 {
            x: call.dest.width / 2.0,
            y: call.dest.height / 2.0,
        };
        let dest = Rectangle {
            x: call.dest.x + origin.x,
            y: call.dest.y + origin.y,
            ..call.dest
        };
        unsafe {
            ffi::DrawTexturePro(
                texture.0,
                ffi_rect(source),
                ffi_rect(dest),
                origin,
                call.rotation,
                ffi_color(Color::WHITE),
            );
        }
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.begin();
        unsafe { ffi::ClearBackground(ffi_color(color)) };
        Ok(())
    }

    fn present(&mut self) -> Result<(), String> {
        self.begin();
        unsafe { ffi::EndDrawing() };
        self.drawing = false;
        Ok(())
    }
}

/// Polls raylib's input state for the watched codes.
///
/// raylib keeps no event queue, so edges are reconstructed from its
/// pressed/released queries each frame.
#[derive(Debug)]
pub struct RaylibEventSource {
    last_mouse: Option<Vector2>,
}

impl RaylibEventSource {
    pub fn new(_thread: &RaylibThread) -> Self {
        Self { last_mouse: None }
    }
}

impl EventSource for RaylibEventSource {
    fn poll(&mut self, watched: &[InputCode]) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let mouse = unsafe { ffi::GetMousePosition() };
        let position = Vector2 {
            x: mouse.x,
            y: mouse.y,
        };
        let moved = self
            .last_mouse
            .is_none_or(|last| last.x != position.x || last.y != position.y);
        if moved {
            events.push(InputEvent::MouseMotion { position });
            self.last_mouse = Some(position);
        }

        for &code in watched {
            match code {
                InputCode::Keyboard(key) => unsafe {
                    if ffi::IsKeyPressed(key) {
                        events.push(InputEvent::KeyDown { code: key, repeat: false });
                    } else if ffi::IsKeyPressedRepeat(key) {
                        events.push(InputEvent::KeyDown { code: key, repeat: true });
                    }
                    if ffi::IsKeyReleased(key) {
                        events.push(InputEvent::KeyUp { code: key });
                    }
                },
                InputCode::MouseButton(button) => unsafe {
                    if ffi::IsMouseButtonPressed(button) {
                        events.push(InputEvent::MouseButtonDown { button, position });
                    }
                    if ffi::IsMouseButtonReleased(button) {
                        events.push(InputEvent::MouseButtonUp { button, position });
                    }
                },
            }
        }

        if unsafe { ffi::WindowShouldClose() } {
            events.push(InputEvent::Quit);
        }

        events
    }
}
