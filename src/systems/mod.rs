//! Engine systems.
//!
//! Submodules overview
//! - [`audio`] – play sound effects bound to pressed actions
//! - [`camera`] – keep the camera centred on its target
//! - [`input`] – poll the native event source into [`crate::resources::input::InputManager`]
//! - [`movement`] – move input-controlled entities from the `move_*` actions
//! - [`render`] – draw parallax layers, world sprites and the HUD
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod camera;
pub mod input;
pub mod movement;
pub mod render;
pub mod time;
