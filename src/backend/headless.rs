//! In-memory backend.
//!
//! Implements every native seam without a window, GPU or audio device, so the
//! core can run in unit tests, integration tests and tools:
//!
//! - [`HeadlessAssets`] "loads" only paths registered beforehand and counts
//!   live handles so tests can observe release.
//! - [`RecordingTarget`] records every draw, clear and present.
//! - [`ScriptedEvents`] replays a queue of per-frame event batches.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::trace;
use raylib::prelude::{Color, Vector2};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{AssetLoader, AudioKind, DrawCall, DrawTarget, EventSource, NativeTexture};
use crate::events::input::{InputCode, InputEvent};

/// Decrements the shared live-handle counter when dropped.
#[derive(Debug)]
struct LiveToken(Rc<Cell<usize>>);

impl LiveToken {
    fn acquire(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter.clone())
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct HeadlessTexture {
    path: String,
    size: Vector2,
    _live: LiveToken,
}

impl HeadlessTexture {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl NativeTexture for HeadlessTexture {
    fn size(&self) -> Vector2 {
        self.size
    }
}

#[derive(Debug)]
pub struct HeadlessAudio {
    path: String,
    kind: AudioKind,
    _live: LiveToken,
}

impl HeadlessAudio {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The kind requested by the load that created this clip.
    pub fn kind(&self) -> AudioKind {
        self.kind
    }
}

#[derive(Debug)]
pub struct HeadlessFont {
    path: String,
    size: i32,
    _live: LiveToken,
}

impl HeadlessFont {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> i32 {
        self.size
    }
}

/// Asset loader backed by a table of registered paths.
#[derive(Debug, Default)]
pub struct HeadlessAssets {
    textures: FxHashMap<String, Vector2>,
    audio: FxHashSet<String>,
    fonts: FxHashSet<String>,
    live: Rc<Cell<usize>>,
    loads: usize,
    played: Vec<String>,
}

impl HeadlessAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `path` loadable as a texture of the given size.
    pub fn register_texture(&mut self, path: &str, width: f32, height: f32) {
        self.textures.insert(
            path.to_string(),
            Vector2 {
                x: width,
                y: height,
            },
        );
    }

    pub fn register_audio(&mut self, path: &str) {
        self.audio.insert(path.to_string());
    }

    pub fn register_font(&mut self, path: &str) {
        self.fonts.insert(path.to_string());
    }

    /// Number of successful loads so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Number of handles created and not yet dropped.
    pub fn live_handles(&self) -> usize {
        self.live.get()
    }

    /// Shared counter behind [`live_handles`](Self::live_handles); stays
    /// readable after the loader itself is dropped.
    pub fn live_counter(&self) -> Rc<Cell<usize>> {
        self.live.clone()
    }

    /// Paths passed to `play_audio`, in order.
    pub fn played(&self) -> &[String] {
        &self.played
    }
}

impl AssetLoader for HeadlessAssets {
    type Texture = HeadlessTexture;
    type Audio = HeadlessAudio;
    type Font = HeadlessFont;

    fn load_texture(&mut self, path: &str) -> Result<HeadlessTexture, String> {
        let size = *self
            .textures
            .get(path)
            .ok_or_else(|| format!("no such file: {}", path))?;
        self.loads += 1;
        Ok(HeadlessTexture {
            path: path.to_string(),
            size,
            _live: LiveToken::acquire(&self.live),
        })
    }

    fn load_audio(&mut self, path: &str, kind: AudioKind) -> Result<HeadlessAudio, String> {
        if !self.audio.contains(path) {
            return Err(format!("no such file: {}", path));
        }
        self.loads += 1;
        Ok(HeadlessAudio {
            path: path.to_string(),
            kind,
            _live: LiveToken::acquire(&self.live),
        })
    }

    fn load_font(&mut self, path: &str, size: i32) -> Result<HeadlessFont, String> {
        if !self.fonts.contains(path) {
            return Err(format!("no such file: {}", path));
        }
        self.loads += 1;
        Ok(HeadlessFont {
            path: path.to_string(),
            size,
            _live: LiveToken::acquire(&self.live),
        })
    }

    fn play_audio(&mut self, audio: &HeadlessAudio) -> Result<(), String> {
        trace!("headless play: {}", audio.path);
        self.played.push(audio.path.clone());
        Ok(())
    }
}

/// One operation observed by [`RecordingTarget`].
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Draw { texture: String, call: DrawCall },
    Clear(Color),
    Present,
}

/// Draw target that keeps a log of everything drawn.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<RecordedCall>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the draw calls, with the texture path they sampled.
    pub fn draws(&self) -> Vec<(&str, DrawCall)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RecordedCall::Draw { texture, call } => Some((texture.as_str(), *call)),
                _ => None,
            })
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RecordedCall::Present))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl DrawTarget for RecordingTarget {
    type Texture = HeadlessTexture;

    fn draw_texture(&mut self, texture: &HeadlessTexture, call: &DrawCall) -> Result<(), String> {
        self.calls.push(RecordedCall::Draw {
            texture: texture.path.clone(),
            call: *call,
        });
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.calls.push(RecordedCall::Clear(color));
        Ok(())
    }

    fn present(&mut self) -> Result<(), String> {
        self.calls.push(RecordedCall::Present);
        Ok(())
    }
}

/// Event source replaying queued frames. An exhausted queue yields no events.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, _watched: &[InputCode]) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
