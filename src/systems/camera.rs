//! Camera follow system.
//!
//! Keeps the [`CameraTarget`] entity centred in the view. The camera clamps
//! itself, so near the level edges the target drifts off-centre.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::inputcontrolled::CameraTarget;
use crate::components::mapposition::MapPosition;
use crate::resources::camera::Camera;

pub fn camera_follow_system(
    mut camera: ResMut<Camera>,
    query: Query<&MapPosition, With<CameraTarget>>,
) {
    let Ok(target) = query.single() else {
        return;
    };
    let viewport = camera.viewport_size();
    let desired = Vector2 {
        x: target.pos.x - viewport.x / 2.0,
        y: target.pos.y - viewport.y / 2.0,
    };
    let current = camera.position();
    if desired.x == current.x && desired.y == current.y {
        return;
    }
    camera.move_by(Vector2 {
        x: desired.x - current.x,
        y: desired.y - current.y,
    });
}
