use lumen_engine::coords::Viewport;
use lumen_engine::core::{App, AppControl, FrameCtx, InputCtx, UpdateCtx};
use lumen_engine::input::{InputEvent, InputFrame, InputState};
use lumen_engine::paint::Color;
use lumen_engine::scene::DrawList;
use lumen_engine::time::RateReport;
use lumen_ui::painter::Painter;

use crate::screens::menu::MenuScreen;
use crate::screens::options::OptionsScreen;
use crate::screens::playing::PlayingScreen;
use crate::screens::Screen;

const CLEAR: Color = Color::from_premul(0.02, 0.025, 0.035, 1.0);

/// Player preferences; survive screen changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    /// Master volume in [0, 1].
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { volume: 0.8 }
    }
}

impl Settings {
    /// Adds `delta` to the volume, clamped to [0, 1] and kept on tenths.
    pub fn adjust_volume(&mut self, delta: f32) {
        let v = (self.volume + delta).clamp(0.0, 1.0);
        self.volume = (v * 10.0).round() / 10.0;
    }
}

/// Current screen with its data.
#[derive(Debug)]
pub enum GameState {
    Menu(MenuScreen),
    Playing(PlayingScreen),
    Options(OptionsScreen),
    Quit,
}

impl GameState {
    pub fn screen(&self) -> Screen {
        match self {
            GameState::Menu(_) => Screen::Menu,
            GameState::Playing(_) => Screen::Playing,
            GameState::Options(_) => Screen::Options,
            GameState::Quit => Screen::Quit,
        }
    }
}

/// The game: dispatches runtime callbacks to the active screen.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    settings: Settings,
    viewport: Viewport,
    pending_title: Option<String>,
}

impl Game {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: GameState::Menu(MenuScreen::new(viewport)),
            settings: Settings::default(),
            viewport,
            pending_title: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the screen for `to`. Leaving a session discards it.
    fn transition(&mut self, to: Screen) -> AppControl {
        log::info!("screen {:?} -> {:?}", self.state.screen(), to);

        self.state = match to {
            Screen::Menu => GameState::Menu(MenuScreen::new(self.viewport)),
            Screen::Playing => GameState::Playing(PlayingScreen::new(self.viewport)),
            Screen::Options => GameState::Options(OptionsScreen::new(self.viewport, &self.settings)),
            Screen::Quit => GameState::Quit,
        };

        if to == Screen::Quit {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn apply(&mut self, next: Option<Screen>) -> AppControl {
        match next {
            Some(to) => self.transition(to),
            None if matches!(self.state, GameState::Quit) => AppControl::Exit,
            None => AppControl::Continue,
        }
    }

    pub fn handle_input(&mut self, ev: &InputEvent) -> AppControl {
        let next = match &mut self.state {
            GameState::Menu(menu) => menu.handle_input(ev),
            GameState::Playing(playing) => playing.handle_input(ev),
            GameState::Options(options) => options.handle_input(ev, &mut self.settings),
            GameState::Quit => None,
        };
        self.apply(next)
    }

    /// Runs one fixed step. `frame` holds the transitions since the previous step.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, dt: f32) -> AppControl {
        let next = match &mut self.state {
            GameState::Playing(playing) => playing.update(input, frame, dt),
            GameState::Menu(_) | GameState::Options(_) | GameState::Quit => None,
        };
        self.apply(next)
    }

    /// Lays the active screen out for `viewport` and records it into `list`.
    pub fn draw(&mut self, viewport: Viewport, list: &mut DrawList) {
        if viewport != self.viewport && viewport.is_valid() {
            self.viewport = viewport;
            match &mut self.state {
                GameState::Menu(menu) => menu.layout(viewport),
                GameState::Playing(playing) => playing.layout(viewport),
                GameState::Options(options) => options.layout(viewport),
                GameState::Quit => {}
            }
        }

        let mut painter = Painter::new(list);
        match &self.state {
            GameState::Menu(menu) => menu.draw(&mut painter),
            GameState::Playing(playing) => playing.draw(&mut painter),
            GameState::Options(options) => options.draw(&mut painter),
            GameState::Quit => {}
        }
    }
}

impl App for Game {
    fn on_input(&mut self, event: &InputEvent, _ctx: &mut InputCtx<'_>) -> AppControl {
        self.handle_input(event)
    }

    fn on_update(&mut self, ctx: &mut UpdateCtx<'_>) -> AppControl {
        if let Some(title) = self.pending_title.take() {
            ctx.runtime.set_title(title);
        }
        self.update(ctx.input, ctx.input_frame, ctx.dt_secs())
    }

    fn on_render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        ctx.render(CLEAR, |viewport, list| self.draw(viewport, list))
    }

    fn on_report(&mut self, report: &RateReport) {
        self.pending_title = Some(format!(
            "lumen | {:.0} FPS | {:.0} UPS",
            report.fps(),
            report.ups()
        ));
    }
}
