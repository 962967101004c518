//! # Input State
//!
//! This module defines the input state types used by the input manager:
//! a per-key transition enum and the immutable per-frame snapshot handed
//! to the engine.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Represents the state of a key or button across two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Not pressed
    #[default]
    NotPressed,
    /// Just pressed this frame
    Pressed,
    /// Held down for multiple frames
    Held,
    /// Just released this frame
    Released,
}

impl ButtonState {
    /// Whether the input is actively down (pressed or held).
    pub fn is_active(&self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Held)
    }

    /// Whether the input was pressed this very frame.
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, ButtonState::Pressed)
    }

    /// Derives the transition from the previous and current raw states.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => ButtonState::Pressed,
            (true, true) => ButtonState::Held,
            (true, false) => ButtonState::Released,
            (false, false) => ButtonState::NotPressed,
        }
    }
}

/// A snapshot of all processed input for one frame.
pub struct ProcessedInputState {
    /// Transition state of every tracked keyboard key
    pub keyboard_states: HashMap<KeyCode, ButtonState>,

    /// Transition state of every tracked mouse button
    pub mouse_button_states: HashMap<MouseButton, ButtonState>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,

    /// Last reported cursor position in window pixels, used for menu
    /// button hit tests while the pointer is released
    pub cursor_position: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the transition state of a keyboard key.
    pub fn get_key_state(&self, key: KeyCode) -> ButtonState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the transition state of a mouse button.
    pub fn get_mouse_button_state(&self, button: MouseButton) -> ButtonState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    /// Gets the mouse movement accumulated since the last frame.
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Tracks the raw state of mouse inputs between frames.
pub struct MouseInput {
    /// Previous frame's state of each mouse button
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Current state of each mouse button
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,

    /// Accumulated motion delta since the last frame
    pub mouse_delta: Option<(f64, f64)>,

    /// Last reported cursor position in window pixels
    pub cursor_position: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_cover_all_raw_state_pairs() {
        assert_eq!(ButtonState::from_raw_states(false, true), ButtonState::Pressed);
        assert_eq!(ButtonState::from_raw_states(true, true), ButtonState::Held);
        assert_eq!(ButtonState::from_raw_states(true, false), ButtonState::Released);
        assert_eq!(
            ButtonState::from_raw_states(false, false),
            ButtonState::NotPressed
        );
    }

    #[test]
    fn activity_and_just_pressed_are_distinct() {
        assert!(ButtonState::Pressed.is_active());
        assert!(ButtonState::Held.is_active());
        assert!(!ButtonState::Released.is_active());
        assert!(!ButtonState::NotPressed.is_active());

        assert!(ButtonState::Pressed.is_just_pressed());
        assert!(!ButtonState::Held.is_just_pressed());
    }
}
