use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Held keys, held buttons, pointer position and focus for the game window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer: Option<Vec2>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the current state and records the transition in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !*focused {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(pos) => self.pointer = Some(*pos),

            InputEvent::PointerLeft => self.pointer = None,

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(b) => {
                self.pointer = Some(b.pos);
                self.modifiers = b.modifiers;
                match b.state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(b.button) {
                            frame.buttons_pressed.insert(b.button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(&b.button) {
                            frame.buttons_released.insert(b.button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_key_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(k))
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut InputState, frame: &mut InputFrame, events: impl IntoIterator<Item = InputEvent>) {
        for ev in events {
            state.apply_event(frame, ev);
        }
    }

    #[test]
    fn press_and_release_record_transitions_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        apply(&mut state, &mut frame, [
            InputEvent::key_pressed(Key::A),
            InputEvent::key_pressed(Key::A), // auto-repeat
        ]);
        assert!(state.key_down(Key::A));
        assert!(frame.key_pressed(Key::A));
        assert_eq!(frame.keys_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        apply(&mut state, &mut frame, [InputEvent::key_released(Key::A)]);
        assert!(!state.key_down(Key::A));
        assert!(frame.keys_released.contains(&Key::A));
        assert!(!frame.key_pressed(Key::A));
    }

    #[test]
    fn releasing_an_unheld_key_is_not_a_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(&mut state, &mut frame, [InputEvent::key_released(Key::W)]);
        assert!(frame.keys_released.is_empty());
        assert!(!frame.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(&mut state, &mut frame, [
            InputEvent::Focused(true),
            InputEvent::key_pressed(Key::D),
            InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, Vec2::new(4.0, 4.0)),
            InputEvent::Focused(false),
        ]);
        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
        assert!(state.buttons_down.is_empty());
    }

    #[test]
    fn pointer_tracks_moves_buttons_and_leave() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        apply(&mut state, &mut frame, [InputEvent::PointerMoved(Vec2::new(1.0, 2.0))]);
        assert_eq!(state.pointer, Some(Vec2::new(1.0, 2.0)));

        apply(&mut state, &mut frame, [
            InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, Vec2::new(3.0, 4.0)),
        ]);
        assert_eq!(state.pointer, Some(Vec2::new(3.0, 4.0)));
        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));

        apply(&mut state, &mut frame, [
            InputEvent::button(MouseButton::Left, MouseButtonState::Released, Vec2::new(3.0, 4.0)),
            InputEvent::PointerLeft,
        ]);
        assert!(frame.button_released(MouseButton::Left));
        assert_eq!(state.pointer, None);
    }

    #[test]
    fn any_key_down_checks_alternatives() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        apply(&mut state, &mut frame, [InputEvent::key_pressed(Key::ArrowLeft)]);
        assert!(state.any_key_down(&[Key::A, Key::ArrowLeft]));
        assert!(!state.any_key_down(&[Key::D, Key::ArrowRight]));
    }
}
