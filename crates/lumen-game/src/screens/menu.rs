use lumen_engine::coords::Viewport;
use lumen_engine::input::{InputEvent, Key};
use lumen_ui::prelude::*;

use super::{danger_palette, pressed, stacked, Screen, BUTTON_GAP, BUTTON_SIZE};

/// Title screen: Play, Options and Quit.
#[derive(Debug)]
pub struct MenuScreen {
    buttons: [Button<Screen>; 3],
}

impl MenuScreen {
    pub fn new(viewport: Viewport) -> Self {
        let mut menu = Self {
            buttons: [
                Button::new(Rect::default(), Screen::Playing),
                Button::new(Rect::default(), Screen::Options),
                Button::new(Rect::default(), Screen::Quit).palette(danger_palette()),
            ],
        };
        menu.layout(viewport);
        menu
    }

    pub fn layout(&mut self, viewport: Viewport) {
        let rects = stacked(viewport, self.buttons.len(), BUTTON_SIZE, BUTTON_GAP);
        for (button, rect) in self.buttons.iter_mut().zip(rects) {
            button.set_bounds(rect);
        }
    }

    pub fn handle_input(&mut self, ev: &InputEvent) -> Option<Screen> {
        if pressed(ev, Key::Enter) {
            return Some(Screen::Playing);
        }

        let ui = UiEvent::from_input(ev)?;
        // Every button sees the event so hover state stays current.
        self.buttons
            .iter_mut()
            .filter_map(|b| b.handle(&ui))
            .last()
    }

    pub fn draw(&self, painter: &mut Painter<'_>) {
        for button in &self.buttons {
            button.paint(painter);
        }
    }

    pub fn buttons(&self) -> &[Button<Screen>] {
        &self.buttons
    }
}
