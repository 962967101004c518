//! # Input Manager
//!
//! This module tracks the raw state of the fixed input surface — movement
//! keys, selection keys, the menu toggle, and the mouse — and turns it
//! into an immutable per-frame snapshot for the engine.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{ButtonState, MouseInput, ProcessedInputState};

/// The fixed key surface: movement (W/A/S/D, Space, LeftShift), the menu
/// toggle (Escape), and the block selection keys (1 through 4).
const KEY_CODES: [KeyCode; 11] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::Escape,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Manages the state of all input devices and processes input events.
///
/// Maintains old/new boolean maps for keys and mouse buttons so each frame
/// can be translated into pressed/held/released transitions.
pub struct InputManager {
    /// Previous frame's state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button in the
    /// released state.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        let mouse_buttons = [MouseButton::Left, MouseButton::Right];

        let mut mouse_button_inputs_old = HashMap::new();
        let mut mouse_button_inputs_new = HashMap::new();

        for button in mouse_buttons {
            mouse_button_inputs_old.insert(button, false);
            mouse_button_inputs_new.insert(button, false);
        }

        let mouse_inputs = MouseInput {
            mouse_button_inputs_old,
            mouse_button_inputs_new,
            mouse_delta: None,
            cursor_position: None,
        };

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs,
        }
    }

    /// Copies the current state over the old state, preparing the next
    /// frame's transition comparisons.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// Handles keyboard, mouse button, and cursor position events;
    /// everything else is ignored.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if let Some(key_state) = self.keyboard_inputs_new.get_mut(key) {
                    *key_state = *state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button_state) =
                    self.mouse_inputs.mouse_button_inputs_new.get_mut(button)
                {
                    *button_state = *state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_inputs.cursor_position = Some((position.x, position.y));
            }
            _ => {}
        }
    }

    /// Accumulates a raw mouse motion delta. Several device events can
    /// arrive between frames; their deltas add up.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let accumulated = match self.mouse_inputs.mouse_delta {
            Some((x, y)) => (x + delta.0, y + delta.1),
            None => delta,
        };
        self.mouse_inputs.mouse_delta = Some(accumulated);
    }

    /// Builds the per-frame snapshot from the raw boolean states.
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let mut keyboard_states = HashMap::new();
        let mut mouse_button_states = HashMap::new();

        for (key, &new_state) in self.keyboard_inputs_new.iter() {
            let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
            keyboard_states.insert(*key, ButtonState::from_raw_states(old_state, new_state));
        }

        for (button, &new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            let old_state = self
                .mouse_inputs
                .mouse_button_inputs_old
                .get(button)
                .copied()
                .unwrap_or(false);
            mouse_button_states.insert(*button, ButtonState::from_raw_states(old_state, new_state));
        }

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
            cursor_position: self.mouse_inputs.cursor_position,
        }
    }

    /// Returns the processed input state and resets per-frame state.
    pub fn get_and_reset_processed_input(&mut self) -> Option<ProcessedInputState> {
        let processed_input = Some(self.create_processed_input_state());
        self.reset_inputs();
        processed_input
    }

    /// Rolls the frame over: current states become old states and the
    /// motion delta clears. Also called when the window loses focus, to
    /// prevent stuck keys.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_deltas_accumulate_within_a_frame() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((2.0, -1.0));
        manager.intake_mouse_motion((3.0, 4.0));

        let snapshot = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(snapshot.mouse_delta, Some((5.0, 3.0)));

        // The next frame starts clean.
        let snapshot = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(snapshot.mouse_delta, None);
    }

    #[test]
    fn held_key_transitions_pressed_then_held() {
        let mut manager = InputManager::new();
        *manager
            .keyboard_inputs_new
            .get_mut(&KeyCode::KeyW)
            .unwrap() = true;

        let snapshot = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(snapshot.get_key_state(KeyCode::KeyW), ButtonState::Pressed);

        let snapshot = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(snapshot.get_key_state(KeyCode::KeyW), ButtonState::Held);
    }

    #[test]
    fn untracked_keys_read_as_not_pressed() {
        let mut manager = InputManager::new();
        let snapshot = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(
            snapshot.get_key_state(KeyCode::KeyQ),
            ButtonState::NotPressed
        );
    }
}
