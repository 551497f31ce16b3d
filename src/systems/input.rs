//! Input system.
//!
//! [`update_input_system`] drains this frame's raw events from the native
//! [`EventSource`] and advances the [`InputManager`] action states. It must
//! run before anything that reads actions.
use bevy_ecs::prelude::*;

use crate::backend::EventSource;
use crate::resources::input::InputManager;

/// Poll the event source for the watched codes and update action states.
pub fn update_input_system<E: EventSource + 'static>(
    mut input: ResMut<InputManager>,
    mut source: NonSendMut<E>,
) {
    let events = source.poll(input.watched_codes());
    input.update(events);
}
