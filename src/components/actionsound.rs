//! Sound effects triggered by actions.
//!
//! An entity carrying [`ActionSounds`] plays a clip each time one of the
//! listed actions is pressed. See
//! [`action_sound_system`](crate::systems::audio::action_sound_system).

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

#[derive(Component, Clone, Debug, Default)]
pub struct ActionSounds {
    /// `(action, clip path)` pairs.
    pub bindings: SmallVec<[(String, String); 2]>,
}

impl ActionSounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: play `path` when `action` is pressed.
    pub fn with(mut self, action: impl Into<String>, path: impl Into<String>) -> Self {
        self.bindings.push((action.into(), path.into()));
        self
    }
}
