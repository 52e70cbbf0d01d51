use lumen_engine::coords::Viewport;
use lumen_engine::input::{InputEvent, InputFrame, InputState, Key};
use lumen_ui::prelude::*;

use super::{pressed, Screen};

/// Player speed in logical pixels per second.
pub const PLAYER_SPEED: f32 = 240.0;
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 24.0);
/// Length of one round in seconds.
pub const ROUND_SECONDS: f32 = 30.0;

const MARGIN: f32 = 24.0;
const BAR_HEIGHT: f32 = 10.0;

const UP: [Key; 2] = [Key::W, Key::ArrowUp];
const DOWN: [Key; 2] = [Key::S, Key::ArrowDown];
const LEFT: [Key; 2] = [Key::A, Key::ArrowLeft];
const RIGHT: [Key; 2] = [Key::D, Key::ArrowRight];

/// In-game screen: a block moved around the play field.
#[derive(Debug)]
pub struct PlayingScreen {
    field: Rect,
    player: Rect,
    elapsed: f32,
    rounds: u32,
    paused: bool,
    progress: ProgressBar,
}

impl PlayingScreen {
    pub fn new(viewport: Viewport) -> Self {
        let mut screen = Self {
            field: Rect::default(),
            player: Rect::new(0.0, 0.0, PLAYER_SIZE.x, PLAYER_SIZE.y),
            elapsed: 0.0,
            rounds: 0,
            paused: false,
            progress: ProgressBar::new(Rect::default())
                .fill_color(Color::from_straight(0.95, 0.75, 0.25, 1.0)),
        };
        screen.layout(viewport);
        screen.player = Rect::centered(screen.field.center(), PLAYER_SIZE);
        screen
    }

    /// Fits the field under the round progress bar; keeps the player inside.
    pub fn layout(&mut self, viewport: Viewport) {
        let bar = Rect::new(MARGIN, MARGIN / 2.0, viewport.width - 2.0 * MARGIN, BAR_HEIGHT);
        let top = bar.max().y + MARGIN / 2.0;

        self.progress.set_bounds(bar);
        self.field = Rect::new(
            MARGIN,
            top,
            (viewport.width - 2.0 * MARGIN).max(PLAYER_SIZE.x),
            (viewport.height - top - MARGIN).max(PLAYER_SIZE.y),
        );
        self.player = self.player.clamped_within(self.field);
    }

    pub fn handle_input(&mut self, ev: &InputEvent) -> Option<Screen> {
        pressed(ev, Key::Escape).then_some(Screen::Menu)
    }

    /// Advances one fixed step of `dt` seconds. `P` pressed since the last
    /// update toggles the pause, which freezes the player and the round clock.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, dt: f32) -> Option<Screen> {
        if frame.key_pressed(Key::P) {
            self.paused = !self.paused;
            log::debug!("paused: {}", self.paused);
        }
        if self.paused {
            return None;
        }

        let step = direction(input).normalized_or_zero() * (PLAYER_SPEED * dt);
        self.player = self.player.translated(step).clamped_within(self.field);

        self.elapsed += dt;
        if self.elapsed >= ROUND_SECONDS {
            self.elapsed -= ROUND_SECONDS;
            self.rounds += 1;
            log::info!("round {} complete", self.rounds);
        }
        self.progress.set_value(self.elapsed / ROUND_SECONDS);

        None
    }

    pub fn draw(&self, painter: &mut Painter<'_>) {
        painter.fill_rect(self.field, Color::from_straight(0.07, 0.09, 0.12, 1.0));
        painter.stroke_rect(self.field, 2.0, Color::from_straight(0.25, 0.30, 0.38, 1.0));
        painter.fill_rect(self.player, Color::from_straight(0.30, 0.85, 0.55, 1.0));
        self.progress.paint(painter);
        if self.paused {
            painter.fill_rect(self.field, Color::from_straight(0.0, 0.0, 0.0, 0.45));
        }
    }

    pub fn player(&self) -> Rect {
        self.player
    }

    pub fn field(&self) -> Rect {
        self.field
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }
}

/// Unnormalized movement direction from the held keys. Opposite keys cancel.
fn direction(input: &InputState) -> Vec2 {
    Vec2::new(axis(input, &LEFT, &RIGHT), axis(input, &UP, &DOWN))
}

fn axis(input: &InputState, neg: &[Key], pos: &[Key]) -> f32 {
    let mut v = 0.0;
    if input.any_key_down(neg) {
        v -= 1.0;
    }
    if input.any_key_down(pos) {
        v += 1.0;
    }
    v
}
