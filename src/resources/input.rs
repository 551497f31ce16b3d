//! Action-mapped input resource.
//!
//! [`InputManager`] turns raw device events into named gameplay actions. It
//! owns the action → key/button binding table (built once from
//! [`GameConfig`]), the inverted device code → actions index, and one
//! [`ActionState`] per action.
//!
//! Each frame [`InputManager::update`] runs two phases:
//! 1. aging: `PressedThisFrame → HeldDown`, `ReleasedThisFrame → Inactive`
//! 2. events: every bound action of an event's device code transitions to
//!    `PressedThisFrame` (down), `HeldDown` (down + repeat) or
//!    `ReleasedThisFrame` (up)
//!
//! Game logic then reads states with [`InputManager::is_action_pressed`],
//! [`InputManager::is_action_down`] and [`InputManager::is_action_released`].
use std::collections::BTreeMap;

use bevy_ecs::prelude::*;
use log::{debug, trace, warn};
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::backend::keynames::input_code_from_name;
use crate::error::SetupError;
use crate::events::input::{InputCode, InputEvent};
use crate::resources::gameconfig::GameConfig;

/// Action synthesised for the primary mouse button when the table lacks it.
pub const MOUSE_LEFT_CLICK: &str = "MouseLeftClick";
/// Action synthesised for the secondary mouse button when the table lacks it.
pub const MOUSE_RIGHT_CLICK: &str = "MouseRightClick";

/// Per-action state across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Inactive,
    PressedThisFrame,
    HeldDown,
    ReleasedThisFrame,
}

impl ActionState {
    /// State after one frame with no new events.
    pub fn aged(self) -> Self {
        match self {
            ActionState::PressedThisFrame => ActionState::HeldDown,
            ActionState::ReleasedThisFrame => ActionState::Inactive,
            stable => stable,
        }
    }
}

/// Resource mapping device input to named actions.
#[derive(Resource, Debug, Clone)]
pub struct InputManager {
    actions_to_keynames: BTreeMap<String, Vec<String>>,
    input_to_actions: FxHashMap<InputCode, SmallVec<[String; 2]>>,
    action_states: FxHashMap<String, ActionState>,
    watched_codes: Vec<InputCode>,
    should_quit: bool,
    mouse_position: Vector2,
}

impl InputManager {
    /// Build the manager from an action → input-name table.
    ///
    /// Unknown key or button names are logged and skipped. The
    /// [`MOUSE_LEFT_CLICK`] and [`MOUSE_RIGHT_CLICK`] actions are added with
    /// default bindings when missing.
    pub fn new(mappings: &BTreeMap<String, Vec<String>>) -> Self {
        let mut manager = Self {
            actions_to_keynames: BTreeMap::new(),
            input_to_actions: FxHashMap::default(),
            action_states: FxHashMap::default(),
            watched_codes: Vec::new(),
            should_quit: false,
            mouse_position: Vector2 { x: 0.0, y: 0.0 },
        };
        manager.initialize_mappings(mappings);
        manager
    }

    /// Build the manager from the [`GameConfig`] resource in `world`.
    ///
    /// Fails when no configuration has been inserted: the manager cannot work
    /// without a binding table.
    pub fn from_world(world: &World) -> Result<Self, SetupError> {
        let Some(config) = world.get_resource::<GameConfig>() else {
            log::error!("InputManager: no GameConfig resource in the world");
            return Err(SetupError::MissingCollaborator("GameConfig"));
        };
        Ok(Self::new(&config.input_mappings))
    }

    fn initialize_mappings(&mut self, mappings: &BTreeMap<String, Vec<String>>) {
        trace!("Initializing input mappings...");
        self.actions_to_keynames = mappings.clone();
        self.input_to_actions.clear();
        self.action_states.clear();
        self.watched_codes.clear();

        if !self.actions_to_keynames.contains_key(MOUSE_LEFT_CLICK) {
            debug!(
                "Config does not define '{}', adding default mapping to 'MouseLeft'.",
                MOUSE_LEFT_CLICK
            );
            self.actions_to_keynames
                .insert(MOUSE_LEFT_CLICK.to_string(), vec!["MouseLeft".to_string()]);
        }
        if !self.actions_to_keynames.contains_key(MOUSE_RIGHT_CLICK) {
            debug!(
                "Config does not define '{}', adding default mapping to 'MouseRight'.",
                MOUSE_RIGHT_CLICK
            );
            self.actions_to_keynames
                .insert(MOUSE_RIGHT_CLICK.to_string(), vec!["MouseRight".to_string()]);
        }

        for (action_name, key_names) in &self.actions_to_keynames {
            self.action_states
                .insert(action_name.clone(), ActionState::Inactive);
            trace!("Mapping action: {}", action_name);

            for key_name in key_names {
                match input_code_from_name(key_name) {
                    Some(code) => {
                        let actions = self.input_to_actions.entry(code).or_default();
                        if !actions.contains(action_name) {
                            actions.push(action_name.clone());
                        }
                        trace!("Mapping input: {} ({:?}) to action: {}", key_name, code, action_name);
                    }
                    None => {
                        warn!(
                            "Input mapping warning: Unknown key or button name '{}' for action '{}'.",
                            key_name, action_name
                        );
                    }
                }
            }
        }

        self.watched_codes = self.input_to_actions.keys().copied().collect();
        trace!("Input mappings initialized.");
    }

    /// Advance one frame: age every state, then apply this frame's events.
    pub fn update(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for state in self.action_states.values_mut() {
            *state = state.aged();
        }

        for event in events {
            self.process_event(&event);
        }
    }

    /// Apply a single raw event without aging.
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { code, repeat } => {
                self.apply_to_bound_actions(InputCode::Keyboard(code), true, repeat);
            }
            InputEvent::KeyUp { code } => {
                self.apply_to_bound_actions(InputCode::Keyboard(code), false, false);
            }
            InputEvent::MouseButtonDown { button, position } => {
                self.apply_to_bound_actions(InputCode::MouseButton(button), true, false);
                self.mouse_position = position;
            }
            InputEvent::MouseButtonUp { button, position } => {
                self.apply_to_bound_actions(InputCode::MouseButton(button), false, false);
                self.mouse_position = position;
            }
            InputEvent::MouseMotion { position } => {
                self.mouse_position = position;
            }
            InputEvent::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn apply_to_bound_actions(&mut self, code: InputCode, is_active: bool, is_repeat: bool) {
        let Some(actions) = self.input_to_actions.get(&code) else {
            return;
        };
        for action_name in actions {
            if let Some(state) = self.action_states.get_mut(action_name) {
                *state = Self::next_state(is_active, is_repeat);
            }
        }
    }

    fn next_state(is_active: bool, is_repeat: bool) -> ActionState {
        match (is_active, is_repeat) {
            (true, false) => ActionState::PressedThisFrame,
            (true, true) => ActionState::HeldDown,
            (false, _) => ActionState::ReleasedThisFrame,
        }
    }

    /// Drive an action directly, bypassing device codes.
    ///
    /// Unregistered names are logged as a usage warning and ignored.
    pub fn update_action_state(&mut self, action_name: &str, is_active: bool, is_repeat: bool) {
        match self.action_states.get_mut(action_name) {
            Some(state) => *state = Self::next_state(is_active, is_repeat),
            None => warn!("Tried to update unregistered action state: {}", action_name),
        }
    }

    /// Current state of `action_name`, `None` if it is not registered.
    pub fn action_state(&self, action_name: &str) -> Option<ActionState> {
        self.action_states.get(action_name).copied()
    }

    /// True while the action is held, including the frame it went down.
    pub fn is_action_down(&self, action_name: &str) -> bool {
        matches!(
            self.action_state(action_name),
            Some(ActionState::PressedThisFrame | ActionState::HeldDown)
        )
    }

    /// True only on the frame the action went down.
    pub fn is_action_pressed(&self, action_name: &str) -> bool {
        self.action_state(action_name) == Some(ActionState::PressedThisFrame)
    }

    /// True only on the frame the action went up.
    pub fn is_action_released(&self, action_name: &str) -> bool {
        self.action_state(action_name) == Some(ActionState::ReleasedThisFrame)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, should_quit: bool) {
        self.should_quit = should_quit;
    }

    /// Last known pointer position in window pixels.
    pub fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    /// Device codes bound to at least one action.
    pub fn watched_codes(&self) -> &[InputCode] {
        &self.watched_codes
    }

    /// The binding table in effect, including synthesised mouse actions.
    pub fn bindings(&self) -> &BTreeMap<String, Vec<String>> {
        &self.actions_to_keynames
    }

    /// Names of the actions bound to `code`.
    pub fn actions_for(&self, code: InputCode) -> &[String] {
        self.input_to_actions
            .get(&code)
            .map(|actions| actions.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::keynames::{mouse_button_from_name, scancode_from_name};

    fn bindings(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(action, keys)| {
                (
                    action.to_string(),
                    keys.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect()
    }

    fn key(name: &str) -> i32 {
        scancode_from_name(name).unwrap()
    }

    fn key_down(name: &str) -> InputEvent {
        InputEvent::KeyDown {
            code: key(name),
            repeat: false,
        }
    }

    fn key_up(name: &str) -> InputEvent {
        InputEvent::KeyUp { code: key(name) }
    }

    #[test]
    fn test_jump_scenario() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));
        input.update([key_down("Space")]);

        assert!(input.is_action_pressed("jump"));
        assert!(input.is_action_down("jump"));
        assert!(!input.is_action_released("jump"));
    }

    #[test]
    fn test_aging_without_events() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));
        input.update_action_state("jump", true, false);
        assert_eq!(input.action_state("jump"), Some(ActionState::PressedThisFrame));
        input.update([]);
        assert_eq!(input.action_state("jump"), Some(ActionState::HeldDown));

        input.update_action_state("jump", false, false);
        assert_eq!(input.action_state("jump"), Some(ActionState::ReleasedThisFrame));
        input.update([]);
        assert_eq!(input.action_state("jump"), Some(ActionState::Inactive));
    }

    #[test]
    fn test_press_release_pairing_over_four_frames() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));

        input.update([key_down("Space")]);
        assert_eq!(input.action_state("jump"), Some(ActionState::PressedThisFrame));
        input.update([]);
        assert_eq!(input.action_state("jump"), Some(ActionState::HeldDown));
        input.update([key_up("Space")]);
        assert_eq!(input.action_state("jump"), Some(ActionState::ReleasedThisFrame));
        input.update([]);
        assert_eq!(input.action_state("jump"), Some(ActionState::Inactive));
    }

    #[test]
    fn test_repeat_signal_reads_as_held() {
        let mut input = InputManager::new(&bindings(&[("move_left", &["A", "Left"])]));
        input.update([InputEvent::KeyDown {
            code: key("Left"),
            repeat: true,
        }]);
        assert_eq!(input.action_state("move_left"), Some(ActionState::HeldDown));
        assert!(input.is_action_down("move_left"));
        assert!(!input.is_action_pressed("move_left"));
    }

    #[test]
    fn test_any_bound_key_drives_action() {
        let mut input = InputManager::new(&bindings(&[("move_left", &["A", "Left"])]));
        input.update([key_down("A")]);
        assert!(input.is_action_pressed("move_left"));
        input.update([key_up("A")]);
        input.update([key_down("Left")]);
        assert!(input.is_action_pressed("move_left"));
    }

    #[test]
    fn test_shared_key_drives_every_bound_action() {
        let mut input =
            InputManager::new(&bindings(&[("jump", &["Space"]), ("confirm", &["Space"])]));
        input.update([key_down("Space")]);
        assert!(input.is_action_pressed("jump"));
        assert!(input.is_action_pressed("confirm"));
        assert_eq!(input.actions_for(InputCode::Keyboard(key("Space"))).len(), 2);
    }

    #[test]
    fn test_unregistered_action_reads_false() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));
        assert!(!input.is_action_down("fly"));
        assert!(!input.is_action_pressed("fly"));
        assert!(!input.is_action_released("fly"));
        // updating an unknown action is ignored
        input.update_action_state("fly", true, false);
        assert_eq!(input.action_state("fly"), None);
    }

    #[test]
    fn test_unbound_key_changes_nothing() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));
        input.update([key_down("Q")]);
        assert_eq!(input.action_state("jump"), Some(ActionState::Inactive));
    }

    #[test]
    fn test_unknown_key_names_are_skipped() {
        let input = InputManager::new(&bindings(&[("jump", &["Bogus", "Space"])]));
        assert_eq!(input.bindings()["jump"].len(), 2);
        assert_eq!(input.actions_for(InputCode::Keyboard(key("Space"))), ["jump"]);
        // Space plus the two synthesised mouse buttons
        assert_eq!(input.watched_codes().len(), 3);
    }

    #[test]
    fn test_implicit_mouse_actions() {
        let mut input = InputManager::new(&bindings(&[("jump", &["Space"])]));
        assert_eq!(input.action_state(MOUSE_LEFT_CLICK), Some(ActionState::Inactive));
        assert_eq!(input.action_state(MOUSE_RIGHT_CLICK), Some(ActionState::Inactive));

        let left = mouse_button_from_name("MouseLeft").unwrap();
        input.update([InputEvent::MouseButtonDown {
            button: left,
            position: Vector2 { x: 10.0, y: 20.0 },
        }]);
        assert!(input.is_action_pressed(MOUSE_LEFT_CLICK));
        assert!(!input.is_action_down(MOUSE_RIGHT_CLICK));
        assert_eq!(input.mouse_position().x, 10.0);
        assert_eq!(input.mouse_position().y, 20.0);
    }

    #[test]
    fn test_configured_mouse_action_is_not_overridden() {
        let input = InputManager::new(&bindings(&[(MOUSE_LEFT_CLICK, &["MouseRight"])]));
        assert_eq!(input.bindings()[MOUSE_LEFT_CLICK], vec!["MouseRight".to_string()]);
    }

    #[test]
    fn test_mouse_motion_moves_pointer_only() {
        let mut input = InputManager::new(&bindings(&[("attack", &["MouseLeft"])]));
        input.update([InputEvent::MouseMotion {
            position: Vector2 { x: 5.0, y: 6.0 },
        }]);
        assert_eq!(input.mouse_position().x, 5.0);
        assert_eq!(input.mouse_position().y, 6.0);
        assert_eq!(input.action_state("attack"), Some(ActionState::Inactive));
    }

    #[test]
    fn test_quit_flag() {
        let mut input = InputManager::new(&bindings(&[]));
        assert!(!input.should_quit());
        input.update([InputEvent::Quit]);
        assert!(input.should_quit());
        input.set_should_quit(false);
        assert!(!input.should_quit());
    }

    #[test]
    fn test_from_world_requires_config() {
        let world = World::new();
        assert!(matches!(
            InputManager::from_world(&world),
            Err(SetupError::MissingCollaborator("GameConfig"))
        ));

        let mut world = World::new();
        world.insert_resource(GameConfig::new());
        let input = InputManager::from_world(&world).unwrap();
        assert_eq!(input.action_state("jump"), Some(ActionState::Inactive));
    }
}
