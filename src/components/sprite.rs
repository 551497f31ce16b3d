//! Sprite component.
//!
//! A [`Sprite`] names the texture to draw and, for sprite sheets, the region
//! of it to sample. It never owns the texture: the id is a key into the
//! [`ResourceManager`](crate::resources::resourcemanager::ResourceManager)
//! texture cache, resolved at draw time.

use bevy_ecs::prelude::Component;
use raylib::prelude::Rectangle;

/// Drawable reference to a cached texture.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    texture_id: String,
    /// Sub-rectangle to sample. `None` samples the whole texture.
    source_rect: Option<Rectangle>,
    flipped: bool,
}

impl Sprite {
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            source_rect: None,
            flipped: false,
        }
    }

    /// Builder-style: sample only `rect` of the texture.
    pub fn with_source_rect(mut self, rect: Rectangle) -> Self {
        self.source_rect = Some(rect);
        self
    }

    /// Builder-style: mirror horizontally.
    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    pub fn texture_id(&self) -> &str {
        &self.texture_id
    }

    pub fn set_texture_id(&mut self, texture_id: impl Into<String>) {
        self.texture_id = texture_id.into();
    }

    pub fn source_rect(&self) -> Option<Rectangle> {
        self.source_rect
    }

    pub fn set_source_rect(&mut self, rect: Option<Rectangle>) {
        self.source_rect = rect;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_samples_whole_texture() {
        let sprite = Sprite::new("player.png");
        assert_eq!(sprite.texture_id(), "player.png");
        assert!(sprite.source_rect().is_none());
        assert!(!sprite.is_flipped());
    }

    #[test]
    fn test_builders_and_setters() {
        let rect = Rectangle {
            x: 16.0,
            y: 0.0,
            width: 16.0,
            height: 16.0,
        };
        let mut sprite = Sprite::new("sheet.png")
            .with_source_rect(rect)
            .with_flipped(true);
        assert_eq!(sprite.source_rect().map(|r| r.x), Some(16.0));
        assert!(sprite.is_flipped());

        sprite.set_source_rect(None);
        sprite.set_flipped(false);
        sprite.set_texture_id("other.png");
        assert!(sprite.source_rect().is_none());
        assert!(!sprite.is_flipped());
        assert_eq!(sprite.texture_id(), "other.png");
    }
}
