use lumen_engine::coords::Rect;
use lumen_engine::paint::Color;

use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Widget;

/// Which look a button currently shows.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonVisual {
    Normal,
    Hovered,
    Pressed,
}

/// Fill colours per visual state plus the outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonPalette {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
    pub border: Color,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            normal: Color::from_straight(0.16, 0.20, 0.28, 1.0),
            hovered: Color::from_straight(0.22, 0.30, 0.42, 1.0),
            pressed: Color::from_straight(0.12, 0.45, 0.75, 1.0),
            border: Color::from_straight(0.55, 0.65, 0.80, 1.0),
        }
    }
}

impl ButtonPalette {
    pub fn fill(&self, visual: ButtonVisual) -> Color {
        match visual {
            ButtonVisual::Normal => self.normal,
            ButtonVisual::Hovered => self.hovered,
            ButtonVisual::Pressed => self.pressed,
        }
    }
}

/// A clickable rectangle that yields `action` when clicked.
///
/// A click is a primary press inside the bounds followed by a release inside
/// the bounds. Releasing outside cancels it.
///
/// # Example
/// ```rust,ignore
/// let mut quit = Button::new(Rect::new(40.0, 200.0, 200.0, 48.0), MenuAction::Quit)
///     .palette(ButtonPalette { pressed: red, ..ButtonPalette::default() });
///
/// if let Some(action) = quit.handle(&event) { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct Button<A> {
    bounds: Rect,
    action: A,
    palette: ButtonPalette,
    border_width: f32,

    hovered: bool,
    pressed: bool,
}

impl<A: Clone> Button<A> {
    pub fn new(bounds: Rect, action: A) -> Self {
        Self {
            bounds,
            action,
            palette: ButtonPalette::default(),
            border_width: 2.0,
            hovered: false,
            pressed: false,
        }
    }

    pub fn palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn border_width(mut self, width: f32) -> Self {
        self.border_width = width.max(0.0);
        self
    }

    /// Moves the button, e.g. after the window was resized.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// Updates hover/press state from `event`; returns the action on a click.
    pub fn handle(&mut self, event: &UiEvent) -> Option<A> {
        match *event {
            UiEvent::PointerMoved { pos } => {
                self.hovered = self.bounds.contains(pos);
                None
            }

            UiEvent::PointerPressed { pos } => {
                self.hovered = self.bounds.contains(pos);
                if self.hovered {
                    self.pressed = true;
                }
                None
            }

            UiEvent::PointerReleased { pos } => {
                self.hovered = self.bounds.contains(pos);
                let clicked = self.pressed && self.hovered;
                self.pressed = false;
                if clicked {
                    log::trace!("button at {:?} clicked", self.bounds.origin);
                }
                clicked.then(|| self.action.clone())
            }

            UiEvent::PointerLeft => {
                self.reset();
                None
            }
        }
    }

    /// Forgets hover and press, e.g. when the owning screen is left.
    pub fn reset(&mut self) {
        self.hovered = false;
        self.pressed = false;
    }

    pub fn visual_state(&self) -> ButtonVisual {
        if self.pressed {
            ButtonVisual::Pressed
        } else if self.hovered {
            ButtonVisual::Hovered
        } else {
            ButtonVisual::Normal
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl<A: Clone> Widget for Button<A> {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, painter: &mut Painter<'_>) {
        painter.fill_rect(self.bounds, self.palette.fill(self.visual_state()));
        painter.stroke_rect(self.bounds, self.border_width, self.palette.border);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::coords::Vec2;
    use lumen_engine::scene::DrawList;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Go,
    }

    fn button() -> Button<Action> {
        Button::new(Rect::new(10.0, 10.0, 100.0, 40.0), Action::Go)
    }

    const INSIDE: Vec2 = Vec2::new(50.0, 30.0);
    const OUTSIDE: Vec2 = Vec2::new(300.0, 30.0);

    #[test]
    fn hover_follows_the_pointer() {
        let mut b = button();
        assert_eq!(b.visual_state(), ButtonVisual::Normal);

        b.handle(&UiEvent::PointerMoved { pos: INSIDE });
        assert_eq!(b.visual_state(), ButtonVisual::Hovered);

        b.handle(&UiEvent::PointerMoved { pos: OUTSIDE });
        assert_eq!(b.visual_state(), ButtonVisual::Normal);
    }

    #[test]
    fn press_and_release_inside_clicks() {
        let mut b = button();
        assert_eq!(b.handle(&UiEvent::PointerPressed { pos: INSIDE }), None);
        assert_eq!(b.visual_state(), ButtonVisual::Pressed);

        assert_eq!(b.handle(&UiEvent::PointerReleased { pos: INSIDE }), Some(Action::Go));
        assert!(!b.is_pressed());
        assert_eq!(b.visual_state(), ButtonVisual::Hovered);
    }

    #[test]
    fn releasing_outside_cancels_the_click() {
        let mut b = button();
        b.handle(&UiEvent::PointerPressed { pos: INSIDE });
        assert_eq!(b.handle(&UiEvent::PointerReleased { pos: OUTSIDE }), None);
        assert!(!b.is_pressed());
        assert_eq!(b.visual_state(), ButtonVisual::Normal);
    }

    #[test]
    fn press_outside_then_release_inside_does_not_click() {
        let mut b = button();
        b.handle(&UiEvent::PointerPressed { pos: OUTSIDE });
        assert!(!b.is_pressed());
        assert_eq!(b.handle(&UiEvent::PointerReleased { pos: INSIDE }), None);
    }

    #[test]
    fn pointer_left_and_reset_clear_state() {
        let mut b = button();
        b.handle(&UiEvent::PointerPressed { pos: INSIDE });
        b.handle(&UiEvent::PointerLeft);
        assert_eq!(b.visual_state(), ButtonVisual::Normal);

        b.handle(&UiEvent::PointerPressed { pos: INSIDE });
        b.reset();
        assert_eq!(b.handle(&UiEvent::PointerReleased { pos: INSIDE }), None);
    }

    #[test]
    fn paints_fill_for_the_current_state_under_its_border() {
        let mut b = button();
        b.handle(&UiEvent::PointerMoved { pos: INSIDE });

        let mut list = DrawList::new();
        b.paint(&mut Painter::new(&mut list));

        let items = list.sorted();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].rect, b.bounds());
        assert_eq!(items[0].color, ButtonPalette::default().hovered);
        assert!(items[1..].iter().all(|c| c.color == ButtonPalette::default().border));
    }
}
