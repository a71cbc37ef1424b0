//! Keyboard state and per-step controller polling
//!
//! Key events arrive asynchronously from the platform and only touch the
//! pressed-key set. The simulation reads them once per fixed step through
//! `InputSource::poll_controller`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Action1,
}

/// Logical movement axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// What a physical key drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    Button(Button),
    /// Adds `modifier` (+1/-1) to the axis while held
    Axis { axis: Axis, modifier: i32 },
}

/// A physical key code (`KeyboardEvent.code`) bound to a logical input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub code: String,
    pub binding: Binding,
}

impl KeyBinding {
    pub fn new(code: &str, binding: Binding) -> Self {
        Self {
            code: code.to_string(),
            binding,
        }
    }
}

/// Fixed mapping from key codes to logical inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings(pub Vec<KeyBinding>);

impl Default for KeyBindings {
    fn default() -> Self {
        Self(vec![
            KeyBinding::new("ArrowLeft", Binding::Axis { axis: Axis::X, modifier: -1 }),
            KeyBinding::new("ArrowRight", Binding::Axis { axis: Axis::X, modifier: 1 }),
            KeyBinding::new("ArrowUp", Binding::Axis { axis: Axis::Y, modifier: -1 }),
            KeyBinding::new("ArrowDown", Binding::Axis { axis: Axis::Y, modifier: 1 }),
            KeyBinding::new("Space", Binding::Button(Button::Action1)),
        ])
    }
}

impl KeyBindings {
    pub fn is_bound(&self, code: &str) -> bool {
        self.0.iter().any(|b| b.code == code)
    }
}

/// Per-actor intent, rebuilt from scratch every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    pub move_x: i32,
    pub move_y: i32,
    pub action_1: bool,
}

impl Controller {
    fn reset(&mut self) {
        self.move_x = 0;
        self.move_y = 0;
        self.action_1 = false;
    }

    fn apply(&mut self, binding: Binding) {
        match binding {
            Binding::Button(Button::Action1) => self.action_1 = true,
            Binding::Axis { axis: Axis::X, modifier } => self.move_x += modifier,
            Binding::Axis { axis: Axis::Y, modifier } => self.move_y += modifier,
        }
    }
}

/// Raw pressed-key state
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    bindings: KeyBindings,
    pressed: HashSet<String>,
}

impl InputSource {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    /// Record a key press. Returns false for codes outside the mapping,
    /// which are ignored.
    pub fn key_down(&mut self, code: &str) -> bool {
        if !self.bindings.is_bound(code) {
            return false;
        }
        self.pressed.insert(code.to_string());
        true
    }

    /// Record a key release
    pub fn key_up(&mut self, code: &str) -> bool {
        self.pressed.remove(code)
    }

    /// Drop every held key (focus loss)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    /// Rebuild `controller` from the instantaneous key set
    pub fn poll_controller(&self, controller: &mut Controller) {
        controller.reset();
        for key in &self.bindings.0 {
            if self.pressed.contains(&key.code) {
                controller.apply(key.binding);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polled(input: &InputSource) -> Controller {
        let mut controller = Controller {
            move_x: 5,
            move_y: -5,
            action_1: true,
        };
        input.poll_controller(&mut controller);
        controller
    }

    #[test]
    fn test_poll_resets_stale_state() {
        let input = InputSource::new(KeyBindings::default());
        assert_eq!(polled(&input), Controller::default());
    }

    #[test]
    fn test_axes_and_button() {
        let mut input = InputSource::new(KeyBindings::default());
        input.key_down("ArrowRight");
        input.key_down("ArrowUp");
        input.key_down("Space");

        let c = polled(&input);
        assert_eq!(c.move_x, 1);
        assert_eq!(c.move_y, -1);
        assert!(c.action_1);

        input.key_up("Space");
        assert!(!polled(&input).action_1);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputSource::new(KeyBindings::default());
        input.key_down("ArrowLeft");
        input.key_down("ArrowRight");
        assert_eq!(polled(&input).move_x, 0);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputSource::new(KeyBindings::default());
        assert!(!input.key_down("KeyQ"));
        assert!(!input.is_pressed("KeyQ"));
        assert_eq!(polled(&input), Controller::default());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputSource::new(KeyBindings::default());
        input.key_down("ArrowDown");
        input.key_down("Space");
        input.clear();
        assert_eq!(polled(&input), Controller::default());
    }
}
