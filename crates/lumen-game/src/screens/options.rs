use lumen_engine::coords::Viewport;
use lumen_engine::input::{InputEvent, Key};
use lumen_ui::prelude::*;

use super::{pressed, pressed_or_repeated, Screen, BUTTON_GAP, BUTTON_SIZE};
use crate::state::Settings;

/// Volume change per Left/Right press.
pub const VOLUME_STEP: f32 = 0.1;

const VOLUME_BAR_HEIGHT: f32 = 18.0;

/// Settings screen: a volume bar and a Back button.
#[derive(Debug)]
pub struct OptionsScreen {
    volume: ProgressBar,
    back: Button<Screen>,
}

impl OptionsScreen {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let mut screen = Self {
            volume: ProgressBar::new(Rect::default())
                .fill_color(Color::from_straight(0.35, 0.75, 0.95, 1.0))
                .value(settings.volume),
            back: Button::new(Rect::default(), Screen::Menu),
        };
        screen.layout(viewport);
        screen
    }

    pub fn layout(&mut self, viewport: Viewport) {
        let center = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);
        let bar = Rect::centered(
            center - Vec2::new(0.0, (VOLUME_BAR_HEIGHT + BUTTON_GAP) / 2.0),
            Vec2::new(BUTTON_SIZE.x * 1.5, VOLUME_BAR_HEIGHT),
        );
        let back = Rect::new(
            center.x - BUTTON_SIZE.x / 2.0,
            bar.max().y + BUTTON_GAP,
            BUTTON_SIZE.x,
            BUTTON_SIZE.y,
        );

        self.volume.set_bounds(bar);
        self.back.set_bounds(back);
    }

    pub fn handle_input(&mut self, ev: &InputEvent, settings: &mut Settings) -> Option<Screen> {
        if pressed(ev, Key::Escape) {
            return Some(Screen::Menu);
        }

        if pressed_or_repeated(ev, Key::ArrowLeft) {
            settings.adjust_volume(-VOLUME_STEP);
        } else if pressed_or_repeated(ev, Key::ArrowRight) {
            settings.adjust_volume(VOLUME_STEP);
        }
        self.volume.set_value(settings.volume);

        let ui = UiEvent::from_input(ev)?;
        self.back.handle(&ui)
    }

    pub fn draw(&self, painter: &mut Painter<'_>) {
        self.volume.paint(painter);
        self.back.paint(painter);
    }

    pub fn volume_bar(&self) -> &ProgressBar {
        &self.volume
    }

    pub fn back_button(&self) -> &Button<Screen> {
        &self.back
    }
}
