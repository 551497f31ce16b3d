//! Z-index component for render ordering.
//!
//! Within each render pass (parallax, world, HUD) entities with higher
//! [`ZIndex`] values are drawn on top of those with lower values.

use bevy_ecs::prelude::Component;

/// Rendering order hint. Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
