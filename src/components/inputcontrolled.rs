//! Input-controlled movement components.
//!
//! - [`InputControlled`] – entity moved by the `move_*` actions
//! - [`CameraTarget`] – entity the camera keeps centred
//!
//! Systems in [`crate::systems::movement`] and [`crate::systems::camera`]
//! read these components.

use bevy_ecs::prelude::Component;

/// Movement driven by the directional actions.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Speed in world units per second.
    pub speed: f32,
}

impl InputControlled {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

/// Marker for the entity followed by the camera.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraTarget;
