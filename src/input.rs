//! Keyboard input boundary
//!
//! Maps browser key names to logical controls and turns raw key events into
//! per-tick [`TickInput`] snapshots. Turning is level-triggered; fire and
//! restart fire once per physical press (auto-repeat is ignored).

use crate::sim::TickInput;

/// Logical game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Fire,
    Restart,
}

impl Control {
    /// Map a `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::TurnLeft),
            "ArrowRight" | "d" | "D" => Some(Control::TurnRight),
            "ArrowUp" | " " => Some(Control::Fire),
            "r" | "R" => Some(Control::Restart),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const CONTROL_COUNT: usize = 4;

/// Accumulated keyboard state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; CONTROL_COUNT],
    pressed: [bool; CONTROL_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key maps to a control.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some(control) = Control::from_key(key) else {
            return false;
        };
        let i = control.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
        true
    }

    /// Record a key release. Returns true if the key maps to a control.
    pub fn key_up(&mut self, key: &str) -> bool {
        let Some(control) = Control::from_key(key) else {
            return false;
        };
        self.held[control.index()] = false;
        true
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next tick, consuming one-shot presses
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            turn_left: self.held[Control::TurnLeft.index()],
            turn_right: self.held[Control::TurnRight.index()],
            fire: self.pressed[Control::Fire.index()],
            restart: self.pressed[Control::Restart.index()],
        };
        self.pressed = [false; CONTROL_COUNT];
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::TurnLeft));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::TurnRight));
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::Fire));
        assert_eq!(Control::from_key("R"), Some(Control::Restart));
        assert_eq!(Control::from_key("Escape"), None);
    }

    #[test]
    fn test_turn_is_level_triggered() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        assert!(input.take_tick_input().turn_left);
        assert!(input.take_tick_input().turn_left);
        input.key_up("ArrowLeft");
        assert!(!input.take_tick_input().turn_left);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down("ArrowUp");
        // Browser auto-repeat sends more keydowns while held
        input.key_down("ArrowUp");
        assert!(input.take_tick_input().fire);
        input.key_down("ArrowUp");
        assert!(!input.take_tick_input().fire);

        input.key_up("ArrowUp");
        input.key_down("ArrowUp");
        assert!(input.take_tick_input().fire);
    }

    #[test]
    fn test_quick_tap_between_ticks_still_fires() {
        let mut input = InputState::new();
        input.key_down(" ");
        input.key_up(" ");
        let tick = input.take_tick_input();
        assert!(tick.fire);
        assert!(!input.is_held(Control::Fire));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputState::new();
        assert!(!input.key_down("q"));
        let tick = input.take_tick_input();
        assert!(!tick.fire && !tick.restart && !tick.turn_left && !tick.turn_right);
    }
}
