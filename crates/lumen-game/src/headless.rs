use std::cell::RefCell;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use lumen_engine::core::AppControl;
use lumen_engine::input::{InputEvent, InputFrame, InputState, Key};
use lumen_engine::scene::DrawList;
use lumen_engine::time::{FramePacer, StopSignal};

use crate::config::GameConfig;
use crate::state::Game;

/// Totals from a headless run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HeadlessSummary {
    pub updates: u64,
    pub frames: u64,
}

/// Plays for `duration` without a window: the player holds Right and frames are
/// recorded into a draw list that is never presented.
///
/// Ends early if the game asks to exit.
pub fn run(config: &GameConfig, duration: Duration) -> Result<HeadlessSummary> {
    let mut pacer = FramePacer::new(&config.pacer_config()).context("invalid pacer configuration")?;
    let stop = StopSignal::new();

    let timer = {
        let stop = stop.clone();
        thread::Builder::new()
            .name("headless-timer".to_string())
            .spawn(move || {
                thread::sleep(duration);
                stop.stop();
            })
            .context("failed to spawn headless timer")?
    };

    let viewport = config.window_size();
    let game = RefCell::new(Game::new(viewport));
    let mut input = InputState::default();
    let mut frame = InputFrame::default();

    for key in [Key::Enter, Key::D] {
        let ev = InputEvent::key_pressed(key);
        input.apply_event(&mut frame, ev.clone());
        game.borrow_mut().handle_input(&ev);
    }

    let dt = pacer.update_period().as_secs_f32();
    let mut draw_list = DrawList::new();

    log::info!("headless run for {duration:?}");

    pacer.run(
        &stop,
        || update_step(&mut game.borrow_mut(), &input, &mut frame, dt, &stop),
        || {
            draw_list.clear();
            game.borrow_mut().draw(viewport, &mut draw_list);
        },
    );

    // A run ended by the game leaves the timer asleep; it is detached.
    if timer.is_finished() && timer.join().is_err() {
        log::warn!("headless timer thread panicked");
    }

    let summary = HeadlessSummary {
        updates: pacer.update_count(),
        frames: pacer.frame_count(),
    };
    log::info!(
        "headless run done: {} updates, {} frames, {} rects in the last frame",
        summary.updates,
        summary.frames,
        draw_list.len()
    );

    Ok(summary)
}

/// One logic step. `frame` is consumed; an exiting game stops the run.
fn update_step(game: &mut Game, input: &InputState, frame: &mut InputFrame, dt: f32, stop: &StopSignal) {
    if game.update(input, frame, dt) == AppControl::Exit {
        stop.stop();
    }
    frame.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameState;

    #[test]
    fn short_run_updates_and_renders() {
        let config = GameConfig {
            updates_per_second: 1_000.0,
            frames_per_second: 500.0,
            ..GameConfig::default()
        };

        let summary = run(&config, Duration::from_millis(50)).expect("headless run");
        assert!(summary.updates > 0);
        assert!(summary.frames > 0);
        assert!(summary.updates >= summary.frames);
    }

    #[test]
    fn quitting_stops_the_run() {
        use lumen_engine::input::{MouseButton, MouseButtonState};
        use lumen_ui::widget::Widget;

        let config = GameConfig::default();
        let mut game = Game::new(config.window_size());
        let GameState::Menu(menu) = game.state() else {
            panic!("expected the menu");
        };
        let quit = menu.buttons()[2].bounds().center();

        game.handle_input(&InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, quit));
        game.handle_input(&InputEvent::button(MouseButton::Left, MouseButtonState::Released, quit));

        let stop = StopSignal::new();
        let mut frame = InputFrame::default();
        InputState::default().apply_event(&mut frame, InputEvent::key_pressed(Key::D));

        update_step(&mut game, &InputState::default(), &mut frame, 0.005, &stop);
        assert!(stop.is_stopped());
        assert!(frame.is_empty());
    }

    #[test]
    fn frame_is_cleared_after_each_step() {
        let mut game = Game::new(GameConfig::default().window_size());
        let stop = StopSignal::new();
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, InputEvent::key_pressed(Key::Enter));

        update_step(&mut game, &input, &mut frame, 0.005, &stop);
        assert!(frame.is_empty());
        assert!(!stop.is_stopped());
    }
}
