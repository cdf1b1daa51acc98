//! Input sampler
//!
//! Held directions persist between frames; fire triggers are one-shot and
//! drained by `sample`. Unrecognised keys are ignored.

use crate::sim::TickInput;

/// Logical movement controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MoveLeft,
    MoveRight,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` or `.code` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" | "KeyA" => Some(Control::MoveLeft),
            "ArrowRight" | "d" | "D" | "KeyD" => Some(Control::MoveRight),
            _ => None,
        }
    }
}

/// True for keys that fire a bullet (Space)
pub fn is_fire_key(key: &str) -> bool {
    matches!(key, " " | "Space" | "Spacebar")
}

/// Pressed state for each control plus pending fire triggers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    move_left: bool,
    move_right: bool,
    pending_fire: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::MoveLeft => self.move_left = pressed,
            Control::MoveRight => self.move_right = pressed,
        }
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        match control {
            Control::MoveLeft => self.move_left,
            Control::MoveRight => self.move_right,
        }
    }

    /// Key press. Returns true if the key was handled (host may then
    /// suppress the browser default, e.g. page scrolling).
    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(control) = Control::from_key(key) {
            self.set(control, true);
            true
        } else if is_fire_key(key) {
            self.pending_fire += 1;
            true
        } else {
            false
        }
    }

    /// Key release. Returns true if the key maps to a control.
    pub fn key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, false);
                true
            }
            None => false,
        }
    }

    /// Mouse click / pointer tap on the play area
    pub fn pointer_fire(&mut self) {
        self.pending_fire += 1;
    }

    /// First touch point at logical `x`: steer toward that half and fire
    pub fn touch_start(&mut self, x: f32, play_width: f32) {
        let mid = play_width / 2.0;
        self.move_left = x < mid;
        self.move_right = x > mid;
        self.pending_fire += 1;
    }

    /// Touch lifted: stop steering
    pub fn touch_end(&mut self) {
        self.move_left = false;
        self.move_right = false;
    }

    /// Snapshot for this frame. Fire triggers are consumed; held
    /// directions are not.
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            fire_triggers: std::mem::take(&mut self.pending_fire),
        }
    }

    /// Release everything (window blur, restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_hold_until_release() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowRight"));

        let first = input.sample();
        assert!(first.move_right);
        assert!(!first.move_left);

        // Still held next frame
        assert!(input.sample().move_right);

        assert!(input.key_up("ArrowRight"));
        assert!(!input.sample().move_right);
    }

    #[test]
    fn test_key_codes_and_letters() {
        assert_eq!(Control::from_key("KeyA"), Some(Control::MoveLeft));
        assert_eq!(Control::from_key("d"), Some(Control::MoveRight));
        assert_eq!(Control::from_key("ArrowUp"), None);
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        let mut input = InputState::new();
        assert!(!input.key_down("F13"));
        assert!(!input.key_up("Shift"));
        assert_eq!(input.sample(), TickInput::default());
    }

    #[test]
    fn test_each_click_is_one_trigger() {
        let mut input = InputState::new();
        input.pointer_fire();
        input.pointer_fire();
        input.key_down(" ");
        assert_eq!(input.sample().fire_triggers, 3);
        // Consumed
        assert_eq!(input.sample().fire_triggers, 0);
    }

    #[test]
    fn test_touch_halves() {
        let mut input = InputState::new();

        input.touch_start(100.0, 800.0);
        let t = input.sample();
        assert!(t.move_left && !t.move_right);
        assert_eq!(t.fire_triggers, 1);

        input.touch_start(700.0, 800.0);
        let t = input.sample();
        assert!(!t.move_left && t.move_right);

        // Dead centre steers neither way but still fires
        input.touch_start(400.0, 800.0);
        let t = input.sample();
        assert!(!t.move_left && !t.move_right);
        assert_eq!(t.fire_triggers, 1);
    }

    #[test]
    fn test_touch_end_clears_directions() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.touch_start(700.0, 800.0);
        input.touch_end();
        assert!(!input.is_pressed(Control::MoveLeft));
        assert!(!input.is_pressed(Control::MoveRight));
    }

    #[test]
    fn test_reset_drops_pending_fire() {
        let mut input = InputState::new();
        input.pointer_fire();
        input.key_down("ArrowLeft");
        input.reset();
        assert_eq!(input.sample(), TickInput::default());
    }
}
