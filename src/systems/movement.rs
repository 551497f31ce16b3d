//! Action-driven movement.
//!
//! Reads the `move_*` actions from the [`InputManager`] and moves every
//! [`InputControlled`] entity. Diagonal movement is normalized to maintain
//! constant speed. Sprites face the direction of horizontal travel.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::input::InputManager;
use crate::resources::worldtime::WorldTime;

pub const MOVE_LEFT: &str = "move_left";
pub const MOVE_RIGHT: &str = "move_right";
pub const MOVE_UP: &str = "move_up";
pub const MOVE_DOWN: &str = "move_down";

pub fn player_movement_system(
    mut query: Query<(&InputControlled, &mut MapPosition, Option<&mut Sprite>)>,
    input: Res<InputManager>,
    time: Res<WorldTime>,
) {
    let axis = |negative: &str, positive: &str| {
        let mut value = 0.0;
        if input.is_action_down(negative) {
            value -= 1.0;
        }
        if input.is_action_down(positive) {
            value += 1.0;
        }
        value
    };
    let mut direction = Vector2 {
        x: axis(MOVE_LEFT, MOVE_RIGHT),
        y: axis(MOVE_UP, MOVE_DOWN),
    };
    if direction.x == 0.0 && direction.y == 0.0 {
        return;
    }
    if direction.x != 0.0 && direction.y != 0.0 {
        direction.x *= std::f32::consts::FRAC_1_SQRT_2;
        direction.y *= std::f32::consts::FRAC_1_SQRT_2;
    }

    for (controlled, mut position, sprite) in query.iter_mut() {
        let step = controlled.speed * time.delta;
        position.translate(direction.x * step, direction.y * step);
        if let Some(mut sprite) = sprite
            && direction.x != 0.0
        {
            sprite.set_flipped(direction.x < 0.0);
        }
    }
}
