//! Action sound effects.
//!
//! [`action_sound_system`] plays the clip bound to each action pressed this
//! frame through the [`ResourceManager`]. A clip that cannot be loaded just
//! does not play.
use bevy_ecs::prelude::*;

use crate::backend::AssetLoader;
use crate::components::actionsound::ActionSounds;
use crate::resources::input::InputManager;
use crate::resources::resourcemanager::ResourceManager;

pub fn action_sound_system<A: AssetLoader + 'static>(
    query: Query<&ActionSounds>,
    input: Res<InputManager>,
    mut resources: NonSendMut<ResourceManager<A>>,
) {
    for sounds in query.iter() {
        for (action, path) in &sounds.bindings {
            if input.is_action_pressed(action) {
                resources.play_sound(path);
            }
        }
    }
}
