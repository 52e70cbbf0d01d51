//! Per-screen data and behaviour. `state::GameState` holds one of these.

pub mod menu;
pub mod options;
pub mod playing;

use lumen_engine::coords::{Rect, Vec2, Viewport};
use lumen_engine::input::{InputEvent, Key, KeyState};
use lumen_engine::paint::Color;
use lumen_ui::prelude::ButtonPalette;

/// Screens a handler can ask to switch to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    Options,
    Quit,
}

pub(crate) const BUTTON_SIZE: Vec2 = Vec2::new(220.0, 44.0);
pub(crate) const BUTTON_GAP: f32 = 16.0;

/// True for a fresh (non-repeating) press of `key`.
pub(crate) fn pressed(ev: &InputEvent, key: Key) -> bool {
    matches!(ev, InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false, .. } if *k == key)
}

/// True for a press of `key`, including OS auto-repeat.
pub(crate) fn pressed_or_repeated(ev: &InputEvent, key: Key) -> bool {
    matches!(ev, InputEvent::Key { key: k, state: KeyState::Pressed, .. } if *k == key)
}

/// `count` rectangles of `size` stacked vertically and centered in `viewport`.
pub(crate) fn stacked(viewport: Viewport, count: usize, size: Vec2, gap: f32) -> Vec<Rect> {
    let total = count as f32 * size.y + count.saturating_sub(1) as f32 * gap;
    let x = (viewport.width - size.x) / 2.0;
    let top = (viewport.height - total) / 2.0;

    (0..count)
        .map(|i| Rect::new(x, top + i as f32 * (size.y + gap), size.x, size.y))
        .collect()
}

pub(crate) fn danger_palette() -> ButtonPalette {
    ButtonPalette {
        normal: Color::from_straight(0.35, 0.12, 0.14, 1.0),
        hovered: Color::from_straight(0.50, 0.16, 0.18, 1.0),
        pressed: Color::from_straight(0.75, 0.20, 0.22, 1.0),
        border: Color::from_straight(0.90, 0.55, 0.55, 1.0),
    }
}
