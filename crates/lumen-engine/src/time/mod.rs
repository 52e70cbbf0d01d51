//! Time subsystem.
//!
//! Fixed-rate stepping for logic updates and rendering, decoupled from the runtime.
//! Intended usage:
//! - one `FramePacer` per game loop
//! - call `step()` once per loop iteration and run the reported number of updates
//!   and at most one render
//!
//! The pacer reads time through the `Clock` trait so headless drivers and tests can
//! substitute a `ManualClock` for the monotonic system clock.

mod clock;
mod pacer;
mod stop;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use pacer::{CatchUp, FramePacer, PacerConfig, RateReport, Tick, STEP_EPSILON};
pub use stop::StopSignal;
