use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source with nanosecond resolution.
///
/// Readings must never decrease. The absolute value is meaningless; only differences
/// between two readings are used.
pub trait Clock {
    fn now_nanos(&mut self) -> u64;
}

/// System monotonic clock backed by `Instant`.
///
/// Readings are relative to the moment the clock was created.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_nanos(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Clock advanced explicitly by the caller.
///
/// Clones share the same reading, so a driver can hand one clone to a `FramePacer`
/// and keep another to move time forward.
///
/// ```
/// use lumen_engine::time::{FramePacer, ManualClock, PacerConfig};
///
/// let clock = ManualClock::new(0);
/// let mut pacer = FramePacer::with_clock(&PacerConfig::default(), clock.clone()).unwrap();
///
/// clock.advance(5_000_000); // one 200 UPS period
/// assert_eq!(pacer.step().updates, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_nanos: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_nanos)),
        }
    }

    /// Current reading in nanoseconds.
    pub fn get(&self) -> u64 {
        self.now.get()
    }

    /// Moves the clock to `nanos`.
    ///
    /// Earlier values are ignored so the clock stays monotonic.
    pub fn set(&self, nanos: u64) {
        if nanos >= self.now.get() {
            self.now.set(nanos);
        }
    }

    pub fn advance(&self, nanos: u64) {
        self.now.set(self.now.get().saturating_add(nanos));
    }
}

impl Clock for ManualClock {
    fn now_nanos(&mut self) -> u64 {
        self.now.get()
    }
}
