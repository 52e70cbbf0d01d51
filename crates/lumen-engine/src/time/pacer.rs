use std::time::Duration;

use anyhow::{ensure, Result};

use super::clock::{Clock, MonotonicClock};
use super::stop::StopSignal;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Slack applied to the step threshold.
///
/// Step periods are rarely whole nanoseconds (60 FPS is 16 666 666.67 ns) while clock
/// readings are, so an accumulator can land a hair below 1 after exactly one period
/// of wall time. Within this slack the step still fires and the decrement clamps at 0.
pub const STEP_EPSILON: f64 = 1e-6;

/// Policy for update debt larger than one step.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CatchUp {
    /// At most one update per iteration. Debt is paid back one step per iteration,
    /// so a long stall leaves the simulation behind for a while.
    SingleStep,

    /// Run updates until the debt is below one step, but no more than `max_steps`
    /// per iteration. Debt beyond that is discarded.
    Drain { max_steps: u32 },
}

/// Rates and policies for a `FramePacer`.
#[derive(Debug, Clone, PartialEq)]
pub struct PacerConfig {
    /// Logic updates per second (UPS).
    pub updates_per_second: f64,

    /// Render calls per second (FPS).
    pub frames_per_second: f64,

    pub catch_up: CatchUp,

    /// How often a `RateReport` is produced and logged. `None` disables reporting.
    pub report_interval: Option<Duration>,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 200.0,
            frames_per_second: 120.0,
            catch_up: CatchUp::SingleStep,
            report_interval: Some(Duration::from_secs(1)),
        }
    }
}

impl PacerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.updates_per_second.is_finite() && self.updates_per_second > 0.0,
            "updates_per_second must be a positive finite rate, got {}",
            self.updates_per_second
        );
        ensure!(
            self.frames_per_second.is_finite() && self.frames_per_second > 0.0,
            "frames_per_second must be a positive finite rate, got {}",
            self.frames_per_second
        );
        if let CatchUp::Drain { max_steps } = self.catch_up {
            ensure!(max_steps > 0, "catch-up drain needs at least one step per iteration");
        }
        if let Some(interval) = self.report_interval {
            ensure!(!interval.is_zero(), "report interval must be non-zero");
        }
        Ok(())
    }

    /// Duration of one logic update.
    pub fn update_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.updates_per_second)
    }

    /// Duration of one rendered frame.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frames_per_second)
    }
}

/// Update and render counts over one reporting interval.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RateReport {
    pub updates: u32,
    pub frames: u32,
    /// Clock time actually covered by the counts (at least the configured interval).
    pub interval: Duration,
}

impl RateReport {
    pub fn ups(&self) -> f64 {
        per_second(self.updates, self.interval)
    }

    pub fn fps(&self) -> f64 {
        per_second(self.frames, self.interval)
    }
}

fn per_second(count: u32, interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs > 0.0 { count as f64 / secs } else { 0.0 }
}

/// Outcome of one pacer iteration.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Tick {
    /// Logic updates owed this iteration. Always 0 or 1 under `CatchUp::SingleStep`.
    pub updates: u32,
    /// Whether a frame should be rendered this iteration.
    pub render: bool,
    /// Present on the iteration that closes a reporting interval.
    pub report: Option<RateReport>,
}

/// Fixed-timestep scheduler for logic updates and rendering.
///
/// Both rates are driven by their own accumulator of "steps owed", advanced by the
/// clock time elapsed since the previous iteration and paid back one step at a time.
/// Updates and renders therefore keep their configured rates independently of each
/// other and of how often the pacer is polled.
///
/// The pacer owns no threads and performs no I/O. Callers either poll `step()` from
/// their own loop (e.g. a windowing event loop) or hand over the thread with `run()`.
#[derive(Debug)]
pub struct FramePacer<C: Clock = MonotonicClock> {
    clock: C,
    catch_up: CatchUp,

    update_period_nanos: f64,
    frame_period_nanos: f64,

    previous: u64,
    update_acc: f64,
    render_acc: f64,

    report_interval_nanos: Option<u64>,
    report_start: u64,
    report_updates: u32,
    report_frames: u32,

    update_count: u64,
    frame_count: u64,
}

impl FramePacer<MonotonicClock> {
    /// Creates a pacer driven by the system monotonic clock.
    pub fn new(config: &PacerConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> FramePacer<C> {
    /// Creates a pacer reading time from `clock`.
    ///
    /// The first `step()` measures elapsed time from this call.
    pub fn with_clock(config: &PacerConfig, mut clock: C) -> Result<Self> {
        config.validate()?;

        let now = clock.now_nanos();

        Ok(Self {
            clock,
            catch_up: config.catch_up,
            update_period_nanos: NANOS_PER_SECOND / config.updates_per_second,
            frame_period_nanos: NANOS_PER_SECOND / config.frames_per_second,
            previous: now,
            update_acc: 0.0,
            render_acc: 0.0,
            report_interval_nanos: config
                .report_interval
                .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
            report_start: now,
            report_updates: 0,
            report_frames: 0,
            update_count: 0,
            frame_count: 0,
        })
    }

    /// Reads the clock once and pays out the steps that became due.
    pub fn step(&mut self) -> Tick {
        let now = self.clock.now_nanos();
        let elapsed = now.saturating_sub(self.previous) as f64;
        self.previous = now;

        self.update_acc += elapsed / self.update_period_nanos;
        self.render_acc += elapsed / self.frame_period_nanos;

        let updates = self.take_updates();
        let render = take_step(&mut self.render_acc);

        self.update_count += u64::from(updates);
        self.report_updates = self.report_updates.saturating_add(updates);
        if render {
            self.frame_count += 1;
            self.report_frames = self.report_frames.saturating_add(1);
        }

        Tick {
            updates,
            render,
            report: self.take_report(now),
        }
    }

    /// Runs one iteration, invoking `on_update` for every owed update and then
    /// `on_render` if a frame is due.
    pub fn step_with<U, R>(&mut self, mut on_update: U, mut on_render: R) -> Tick
    where
        U: FnMut(),
        R: FnMut(),
    {
        let tick = self.step();
        for _ in 0..tick.updates {
            on_update();
        }
        if tick.render {
            on_render();
        }
        tick
    }

    /// Loops until `stop` is set, polling the clock as fast as the callbacks allow.
    ///
    /// The stop flag is checked once at the start of every iteration. A panic inside a
    /// callback unwinds through this call.
    pub fn run<U, R>(&mut self, stop: &StopSignal, mut on_update: U, mut on_render: R)
    where
        U: FnMut(),
        R: FnMut(),
    {
        log::debug!(
            "frame pacer running: update period {:.0} ns, frame period {:.0} ns",
            self.update_period_nanos,
            self.frame_period_nanos
        );

        while !stop.is_stopped() {
            self.step_with(&mut on_update, &mut on_render);
        }

        log::debug!(
            "frame pacer stopped after {} updates and {} frames",
            self.update_count,
            self.frame_count
        );
    }

    /// Re-baselines the clock so time spent before this call is not paid out.
    ///
    /// Accumulated fractions are kept. Useful after a suspend or a blocking load.
    pub fn reset(&mut self) {
        self.previous = self.clock.now_nanos();
    }

    /// Clock time from the most recent step until the next update or render is due.
    pub fn until_next_step(&self) -> Duration {
        let update = (1.0 - STEP_EPSILON - self.update_acc).max(0.0) * self.update_period_nanos;
        let render = (1.0 - STEP_EPSILON - self.render_acc).max(0.0) * self.frame_period_nanos;
        Duration::from_nanos(update.min(render).round() as u64)
    }

    /// Fractional update steps currently owed.
    pub fn update_accumulator(&self) -> f64 {
        self.update_acc
    }

    /// Fractional render steps currently owed.
    pub fn render_accumulator(&self) -> f64 {
        self.render_acc
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_nanos(self.update_period_nanos.round() as u64)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_nanos(self.frame_period_nanos.round() as u64)
    }

    /// Total updates paid out since creation.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total frames paid out since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn take_updates(&mut self) -> u32 {
        match self.catch_up {
            CatchUp::SingleStep => u32::from(take_step(&mut self.update_acc)),
            CatchUp::Drain { max_steps } => {
                let mut steps = 0;
                while steps < max_steps && take_step(&mut self.update_acc) {
                    steps += 1;
                }

                if self.update_acc >= 1.0 - STEP_EPSILON {
                    let mut dropped = self.update_acc.floor();
                    self.update_acc = self.update_acc.fract();
                    // A remainder within epsilon of a whole step counts as owed.
                    if self.update_acc >= 1.0 - STEP_EPSILON {
                        self.update_acc = 0.0;
                        dropped += 1.0;
                    }
                    log::debug!("frame pacer dropped {dropped:.0} update steps after a stall");
                }

                steps
            }
        }
    }

    fn take_report(&mut self, now: u64) -> Option<RateReport> {
        let interval = self.report_interval_nanos?;
        let span = now.saturating_sub(self.report_start);
        if span < interval {
            return None;
        }

        let report = RateReport {
            updates: self.report_updates,
            frames: self.report_frames,
            interval: Duration::from_nanos(span),
        };

        log::info!("FPS: {} | UPS: {}", report.frames, report.updates);

        self.report_start = now;
        self.report_updates = 0;
        self.report_frames = 0;

        Some(report)
    }
}

/// Pays out one step if the accumulator owes one. The result never goes negative.
fn take_step(acc: &mut f64) -> bool {
    if *acc >= 1.0 - STEP_EPSILON {
        *acc = (*acc - 1.0).max(0.0);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    const MS: u64 = 1_000_000;

    fn config(ups: f64, fps: f64) -> PacerConfig {
        PacerConfig {
            updates_per_second: ups,
            frames_per_second: fps,
            catch_up: CatchUp::SingleStep,
            report_interval: None,
        }
    }

    fn pacer(cfg: &PacerConfig) -> (FramePacer<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let pacer = FramePacer::with_clock(cfg, clock.clone()).expect("valid config");
        (pacer, clock)
    }

    // ── step counting ─────────────────────────────────────────────────────

    #[test]
    fn one_period_per_iteration_fires_one_update_each() {
        // Render period of ~11.5 days: never due during the test.
        let (mut p, clock) = pacer(&config(60.0, 1e-6));
        let period = NANOS_PER_SECOND / 60.0;

        let n = 500u64;
        let mut updates = 0;
        let mut renders = 0;
        for i in 1..=n {
            clock.set((i as f64 * period).round() as u64);
            p.step_with(|| updates += 1, || renders += 1);
        }

        assert_eq!(updates, n);
        assert_eq!(renders, 0);
    }

    #[test]
    fn whole_nanosecond_periods_fire_exactly() {
        let (mut p, clock) = pacer(&config(100.0, 1e-6));
        for _ in 0..250 {
            clock.advance(10 * MS);
            assert_eq!(p.step().updates, 1);
        }
        assert_eq!(p.update_count(), 250);
    }

    #[test]
    fn update_and_render_rates_are_independent() {
        let (mut p, clock) = pacer(&config(120.0, 60.0));

        let mut updates = 0i64;
        let mut renders = 0i64;
        for _ in 0..1000 {
            clock.advance(MS);
            p.step_with(|| updates += 1, || renders += 1);
        }

        assert!((updates - 120).abs() <= 1, "updates = {updates}");
        assert!((renders - 60).abs() <= 1, "renders = {renders}");
    }

    #[test]
    fn zero_elapsed_time_fires_nothing() {
        let (mut p, clock) = pacer(&config(60.0, 60.0));
        clock.set(0);
        for _ in 0..100 {
            let tick = p.step();
            assert_eq!(tick.updates, 0);
            assert!(!tick.render);
        }
        assert_eq!(p.update_accumulator(), 0.0);
        assert_eq!(p.render_accumulator(), 0.0);
    }

    #[test]
    fn half_frames_at_sixty_fps_render_on_the_second_step() {
        let (mut p, clock) = pacer(&config(1e-6, 60.0));

        clock.set(8_333_333);
        assert!(!p.step().render);
        assert!((p.render_accumulator() - 0.5).abs() < 1e-6);

        clock.set(16_666_666);
        assert!(p.step().render);
        assert!(p.render_accumulator() >= 0.0);
        assert!(p.render_accumulator() < 1e-6);
    }

    // ── accumulator invariants ────────────────────────────────────────────

    #[test]
    fn decrement_keeps_only_the_fraction() {
        let (mut p, clock) = pacer(&config(100.0, 1e-6));

        for (elapsed_ms, expected_after) in [(15, 0.5), (7, 0.2), (13, 0.5)] {
            clock.advance(elapsed_ms * MS);
            let before = p.update_accumulator() + elapsed_ms as f64 / 10.0;
            assert!((1.0..2.0).contains(&before));

            assert_eq!(p.step().updates, 1);
            let after = p.update_accumulator();
            assert!((after - (before - before.floor())).abs() < 1e-9);
            assert!((after - expected_after).abs() < 1e-9, "after = {after}");
        }
    }

    #[test]
    fn accumulators_never_go_negative() {
        let (mut p, clock) = pacer(&config(60.0, 144.0));
        let mut seed = 0x2545_f491u64;
        for _ in 0..5_000 {
            // xorshift; any jittery sequence of small increments will do.
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            clock.advance(seed % (20 * MS));
            p.step();
            assert!(p.update_accumulator() >= 0.0);
            assert!(p.render_accumulator() >= 0.0);
        }
    }

    // ── catch-up policy ───────────────────────────────────────────────────

    #[test]
    fn single_step_pays_back_a_stall_one_update_per_iteration() {
        let (mut p, clock) = pacer(&config(100.0, 1e-6));

        clock.advance(50 * MS);
        assert_eq!(p.step().updates, 1);
        assert!((p.update_accumulator() - 4.0).abs() < 1e-9);

        for _ in 0..4 {
            assert_eq!(p.step().updates, 1);
        }
        assert_eq!(p.step().updates, 0);
    }

    #[test]
    fn drain_runs_owed_updates_up_to_the_cap() {
        let mut cfg = config(100.0, 1e-6);
        cfg.catch_up = CatchUp::Drain { max_steps: 3 };
        let (mut p, clock) = pacer(&cfg);

        clock.advance(25 * MS);
        assert_eq!(p.step().updates, 2);
        assert!((p.update_accumulator() - 0.5).abs() < 1e-9);

        clock.advance(55 * MS);
        assert_eq!(p.step().updates, 3);
        // 6.0 owed, 3 paid, the rest discarded.
        assert!(p.update_accumulator() < 1.0);
        assert_eq!(p.step().updates, 0);
    }

    #[test]
    fn drain_discards_a_remainder_within_epsilon_of_a_step() {
        let mut cfg = config(100.0, 1e-6);
        cfg.catch_up = CatchUp::Drain { max_steps: 3 };
        let (mut p, clock) = pacer(&cfg);

        // 3.9999996 steps owed: three paid, the near-whole remainder dropped.
        clock.advance(39_999_996);
        assert_eq!(p.step().updates, 3);
        assert!(p.update_accumulator() < 1.0 - STEP_EPSILON);

        assert_eq!(p.step().updates, 0);
    }

    #[test]
    fn render_fires_at_most_once_per_iteration() {
        let (mut p, clock) = pacer(&config(1e-6, 60.0));
        clock.advance(1_000 * MS);
        let tick = p.step();
        assert!(tick.render);
        assert_eq!(p.frame_count(), 1);
    }

    // ── reporting ─────────────────────────────────────────────────────────

    #[test]
    fn report_is_emitted_once_per_interval() {
        let mut cfg = config(100.0, 50.0);
        cfg.report_interval = Some(Duration::from_secs(1));
        let (mut p, clock) = pacer(&cfg);

        for i in 1..=100 {
            clock.advance(10 * MS);
            let tick = p.step();
            if i < 100 {
                assert!(tick.report.is_none(), "early report at step {i}");
            } else {
                let report = tick.report.expect("report after one second");
                assert_eq!(report.updates, 100);
                assert_eq!(report.frames, 50);
                assert_eq!(report.interval, Duration::from_secs(1));
                assert!((report.ups() - 100.0).abs() < 1e-9);
                assert!((report.fps() - 50.0).abs() < 1e-9);
            }
        }

        clock.advance(10 * MS);
        assert!(p.step().report.is_none());
    }

    #[test]
    fn no_report_without_interval() {
        let (mut p, clock) = pacer(&config(100.0, 50.0));
        clock.advance(10_000 * MS);
        assert!(p.step().report.is_none());
    }

    // ── scheduling helpers ────────────────────────────────────────────────

    #[test]
    fn until_next_step_tracks_the_nearest_deadline() {
        let (mut p, clock) = pacer(&config(100.0, 50.0));
        let near = |d: Duration, ms: f64| (d.as_secs_f64() * 1e3 - ms).abs() < 1e-3;

        assert!(near(p.until_next_step(), 10.0));

        clock.advance(4 * MS);
        p.step();
        assert!(near(p.until_next_step(), 6.0));

        clock.advance(6 * MS);
        assert_eq!(p.step().updates, 1);
        assert!(near(p.until_next_step(), 10.0));
    }

    #[test]
    fn reset_discards_elapsed_time() {
        let (mut p, clock) = pacer(&config(100.0, 50.0));
        clock.advance(3_000 * MS);
        p.reset();
        let tick = p.step();
        assert_eq!(tick.updates, 0);
        assert!(!tick.render);
    }

    #[test]
    fn run_returns_once_stopped() {
        let cfg = config(20_000.0, 10_000.0);
        let mut p = FramePacer::new(&cfg).expect("valid config");
        let stop = StopSignal::new();

        let mut updates = 0;
        let stopper = stop.clone();
        p.run(
            &stop,
            || {
                updates += 1;
                if updates == 5 {
                    stopper.stop();
                }
            },
            || {},
        );

        assert!(updates >= 5);
        assert!(p.update_count() >= 5);
    }

    #[test]
    fn run_with_stopped_signal_does_nothing() {
        let (mut p, clock) = pacer(&config(100.0, 100.0));
        clock.advance(1_000 * MS);

        let stop = StopSignal::new();
        stop.stop();

        let mut updates = 0;
        let mut renders = 0;
        p.run(&stop, || updates += 1, || renders += 1);
        assert_eq!(updates, 0);
        assert_eq!(renders, 0);
        assert_eq!(p.update_count(), 0);
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn rejects_invalid_rates() {
        for (ups, fps) in [(0.0, 60.0), (60.0, -1.0), (f64::NAN, 60.0), (60.0, f64::INFINITY)] {
            assert!(config(ups, fps).validate().is_err(), "{ups}/{fps} accepted");
        }
        assert!(FramePacer::with_clock(&config(0.0, 60.0), ManualClock::new(0)).is_err());
    }

    #[test]
    fn rejects_zero_drain_and_zero_interval() {
        let mut cfg = config(60.0, 60.0);
        cfg.catch_up = CatchUp::Drain { max_steps: 0 };
        assert!(cfg.validate().is_err());

        let mut cfg = config(60.0, 60.0);
        cfg.report_interval = Some(Duration::ZERO);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_config_matches_periods() {
        let cfg = PacerConfig::default();
        cfg.validate().expect("default config is valid");
        assert_eq!(cfg.update_period(), Duration::from_millis(5));
        let (p, _) = pacer(&cfg);
        assert_eq!(p.update_period(), Duration::from_millis(5));
        assert_eq!(p.frame_period(), Duration::from_nanos(8_333_333));
    }
}
