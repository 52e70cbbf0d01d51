use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InputCtx, UpdateCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::RectRenderer;
use crate::scene::DrawList;
use crate::time::{Clock, FramePacer, PacerConfig, Tick};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,

    /// Poll the event loop continuously instead of sleeping until the next step
    /// is due. Tighter timing at the cost of a busy core.
    pub busy_wait: bool,

    pub pacer: PacerConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
            resizable: true,
            busy_wait: false,
            pacer: PacerConfig::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub fn exit_requested(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Exit))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the game window and runs `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let pacer = FramePacer::new(&config.pacer).context("invalid pacer configuration")?;
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        log::info!(
            "running at {} UPS / {} FPS ({:?}, busy wait: {})",
            config.pacer.updates_per_second,
            config.pacer.frames_per_second,
            config.pacer.catch_up,
            config.busy_wait
        );

        let mut state = AppState::new(config, gpu_init, app, pacer);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    renderer: RectRenderer,
    draw_list: DrawList,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    pacer: FramePacer,

    window: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A, pacer: FramePacer) -> Self {
        Self {
            config,
            gpu_init,
            app,
            pacer,
            window: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            renderer: RectRenderer::new(),
            draw_list: DrawList::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        self.window = Some(entry);
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = self.window.as_ref() {
                        entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    /// Runs the updates owed by the pacer and schedules the next frame.
    fn pump(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };
        let (app, pacer) = (&mut self.app, &mut self.pacer);
        let mut runtime_ctx = RuntimeCtx::default();

        let control = entry.with_mut(|fields| {
            let (tick, control) =
                run_updates(pacer, app, fields.input_state, fields.input_frame, &mut runtime_ctx);
            if tick.render {
                fields.window.request_redraw();
            }
            control
        });

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);

        if !self.exit_requested {
            event_loop.set_control_flow(next_control_flow(
                self.config.busy_wait,
                Instant::now(),
                self.pacer.until_next_step(),
            ));
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        let (app, window) = (&mut self.app, &mut self.window);

        if let Some(entry) = window.as_mut() {
            entry.with_mut(|fields| {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    renderer: fields.renderer,
                    draw_list: fields.draw_list,
                    input: fields.input_state,
                    runtime: &mut runtime_ctx,
                };
                control = app.on_render(&mut ctx);
            });
        }

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create game window: {e:#}");
            self.request_exit();
            event_loop.exit();
            return;
        }

        // Window and GPU setup time is not owed to the simulation.
        self.pacer.reset();

        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!("suspended; dropping window and surface");
        self.window = None;
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.window.is_none() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        self.pump(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            let scale = fields.window.scale_factor();
            let Some(ev) = translate_window_event(scale, fields.input_state, &event) else {
                return;
            };

            fields.input_state.apply_event(fields.input_frame, ev.clone());

            let mut ctx = InputCtx {
                input: fields.input_state,
                runtime: &mut runtime_ctx,
            };
            control = app.on_input(&ev, &mut ctx);
        });

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
        if self.exit_requested {
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.render(event_loop),

            _ => {}
        }
    }
}

/// Steps `pacer` once and runs the owed updates on `app`, then hands over the
/// rate report if one closed.
///
/// `frame` is cleared after the first update of a burst, so its transitions are
/// seen once. An iteration without updates leaves it for the next one. An update
/// returning `AppControl::Exit` ends the burst.
fn run_updates<A, C>(
    pacer: &mut FramePacer<C>,
    app: &mut A,
    input: &InputState,
    frame: &mut InputFrame,
    runtime: &mut RuntimeCtx,
) -> (Tick, AppControl)
where
    A: App + ?Sized,
    C: Clock,
{
    let tick = pacer.step();
    let dt = pacer.update_period();
    let mut control = AppControl::Continue;

    for _ in 0..tick.updates {
        let mut ctx = UpdateCtx {
            input,
            input_frame: &*frame,
            dt,
            runtime: &mut *runtime,
        };
        control = app.on_update(&mut ctx);
        frame.clear();

        if control == AppControl::Exit {
            break;
        }
    }

    if let Some(report) = tick.report.as_ref() {
        app.on_report(report);
    }

    (tick, control)
}

/// Sleep until the next pacer step is due, or spin when busy waiting.
fn next_control_flow(busy_wait: bool, now: Instant, until_next_step: Duration) -> ControlFlow {
    if busy_wait || until_next_step.is_zero() {
        ControlFlow::Poll
    } else {
        ControlFlow::WaitUntil(now + until_next_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::time::{CatchUp, ManualClock, RateReport};

    const MS: u64 = 1_000_000;

    /// Records what each update saw.
    #[derive(Default)]
    struct Recorder {
        space_seen: Vec<bool>,
        exit_after: Option<usize>,
        reports: Vec<RateReport>,
    }

    impl App for Recorder {
        fn on_update(&mut self, ctx: &mut UpdateCtx<'_>) -> AppControl {
            self.space_seen.push(ctx.input_frame.key_pressed(Key::Space));
            if self.exit_after == Some(self.space_seen.len()) {
                AppControl::Exit
            } else {
                AppControl::Continue
            }
        }

        fn on_render(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }

        fn on_report(&mut self, report: &RateReport) {
            self.reports.push(*report);
        }
    }

    // 100 UPS: one update per 10 ms.
    fn pacer(catch_up: CatchUp, report_interval: Option<Duration>) -> (FramePacer<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let config = PacerConfig {
            updates_per_second: 100.0,
            frames_per_second: 50.0,
            catch_up,
            report_interval,
        };
        let pacer = FramePacer::with_clock(&config, clock.clone()).expect("valid pacer config");
        (pacer, clock)
    }

    fn press_space(input: &mut InputState, frame: &mut InputFrame) {
        input.apply_event(frame, InputEvent::key_pressed(Key::Space));
    }

    #[test]
    fn only_the_first_update_of_a_burst_sees_transitions() {
        let (mut pacer, clock) = pacer(CatchUp::Drain { max_steps: 5 }, None);
        let (mut input, mut frame) = (InputState::default(), InputFrame::default());
        let mut app = Recorder::default();
        let mut runtime = RuntimeCtx::default();

        press_space(&mut input, &mut frame);
        clock.advance(30 * MS);

        let (tick, control) = run_updates(&mut pacer, &mut app, &input, &mut frame, &mut runtime);
        assert_eq!(tick.updates, 3);
        assert_eq!(control, AppControl::Continue);
        assert_eq!(app.space_seen, vec![true, false, false]);
        assert!(frame.is_empty());
    }

    #[test]
    fn transitions_wait_for_an_iteration_with_updates() {
        let (mut pacer, clock) = pacer(CatchUp::SingleStep, None);
        let (mut input, mut frame) = (InputState::default(), InputFrame::default());
        let mut app = Recorder::default();
        let mut runtime = RuntimeCtx::default();

        press_space(&mut input, &mut frame);
        clock.advance(5 * MS);
        let (tick, _) = run_updates(&mut pacer, &mut app, &input, &mut frame, &mut runtime);
        assert_eq!(tick.updates, 0);
        assert!(frame.key_pressed(Key::Space));

        clock.advance(5 * MS);
        let (tick, _) = run_updates(&mut pacer, &mut app, &input, &mut frame, &mut runtime);
        assert_eq!(tick.updates, 1);
        assert_eq!(app.space_seen, vec![true]);
    }

    #[test]
    fn exit_ends_the_burst() {
        let (mut pacer, clock) = pacer(CatchUp::Drain { max_steps: 5 }, None);
        let (input, mut frame) = (InputState::default(), InputFrame::default());
        let mut app = Recorder {
            exit_after: Some(2),
            ..Recorder::default()
        };
        let mut runtime = RuntimeCtx::default();

        clock.advance(40 * MS);
        let (tick, control) = run_updates(&mut pacer, &mut app, &input, &mut frame, &mut runtime);
        assert_eq!(tick.updates, 4);
        assert_eq!(control, AppControl::Exit);
        assert_eq!(app.space_seen.len(), 2);
    }

    #[test]
    fn closed_reports_reach_the_app() {
        let (mut pacer, clock) = pacer(CatchUp::SingleStep, Some(Duration::from_millis(100)));
        let (input, mut frame) = (InputState::default(), InputFrame::default());
        let mut app = Recorder::default();
        let mut runtime = RuntimeCtx::default();

        for _ in 0..10 {
            clock.advance(10 * MS);
            run_updates(&mut pacer, &mut app, &input, &mut frame, &mut runtime);
        }

        assert_eq!(app.reports.len(), 1);
        assert_eq!(app.reports[0].updates, 10);
        assert_eq!(app.reports[0].interval, Duration::from_millis(100));
    }

    #[test]
    fn sleeps_until_the_next_step() {
        let now = Instant::now();
        let wait = Duration::from_millis(4);
        assert_eq!(next_control_flow(false, now, wait), ControlFlow::WaitUntil(now + wait));
    }

    #[test]
    fn busy_wait_and_overdue_steps_poll() {
        let now = Instant::now();
        assert_eq!(next_control_flow(true, now, Duration::from_millis(4)), ControlFlow::Poll);
        assert_eq!(next_control_flow(false, now, Duration::ZERO), ControlFlow::Poll);
    }

    #[test]
    fn runtime_commands_are_buffered_in_order() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.exit_requested());

        ctx.set_title("paused");
        ctx.exit();

        assert!(ctx.exit_requested());
        assert_eq!(
            ctx.commands,
            vec![Command::SetTitle("paused".to_string()), Command::Exit]
        );
    }

    #[test]
    fn default_config_uses_default_pacer_rates() {
        let config = RuntimeConfig::default();
        assert_eq!(config.pacer, PacerConfig::default());
        assert!(!config.busy_wait);
        assert!(config.resizable);
    }
}
