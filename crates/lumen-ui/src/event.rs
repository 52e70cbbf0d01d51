use lumen_engine::coords::Vec2;
use lumen_engine::input::{InputEvent, MouseButton, MouseButtonState};

/// Pointer input routed to widgets. Positions are logical pixels.
///
/// Only the primary (left) button produces press/release events.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiEvent {
    PointerMoved { pos: Vec2 },
    PointerPressed { pos: Vec2 },
    PointerReleased { pos: Vec2 },
    /// Pointer left the window, or the window lost focus.
    PointerLeft,
}

impl UiEvent {
    /// Maps an engine input event to a widget event, if it is one widgets care about.
    pub fn from_input(ev: &InputEvent) -> Option<Self> {
        match ev {
            InputEvent::PointerMoved(pos) => Some(UiEvent::PointerMoved { pos: *pos }),

            InputEvent::PointerButton(b) if b.button == MouseButton::Left => match b.state {
                MouseButtonState::Pressed => Some(UiEvent::PointerPressed { pos: b.pos }),
                MouseButtonState::Released => Some(UiEvent::PointerReleased { pos: b.pos }),
            },

            InputEvent::PointerLeft | InputEvent::Focused(false) => Some(UiEvent::PointerLeft),

            _ => None,
        }
    }

    /// Pointer position carried by the event.
    pub fn pos(&self) -> Option<Vec2> {
        match *self {
            UiEvent::PointerMoved { pos }
            | UiEvent::PointerPressed { pos }
            | UiEvent::PointerReleased { pos } => Some(pos),
            UiEvent::PointerLeft => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::input::Key;

    #[test]
    fn only_the_primary_button_is_routed() {
        let pos = Vec2::new(3.0, 4.0);

        let left = InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, pos);
        assert_eq!(UiEvent::from_input(&left), Some(UiEvent::PointerPressed { pos }));

        let right = InputEvent::button(MouseButton::Right, MouseButtonState::Released, pos);
        assert_eq!(UiEvent::from_input(&right), None);
    }

    #[test]
    fn losing_focus_reads_as_pointer_left() {
        assert_eq!(UiEvent::from_input(&InputEvent::Focused(false)), Some(UiEvent::PointerLeft));
        assert_eq!(UiEvent::from_input(&InputEvent::Focused(true)), None);
        assert_eq!(UiEvent::from_input(&InputEvent::PointerLeft), Some(UiEvent::PointerLeft));
    }

    #[test]
    fn keys_are_not_widget_events() {
        assert_eq!(UiEvent::from_input(&InputEvent::key_pressed(Key::Enter)), None);
    }
}
