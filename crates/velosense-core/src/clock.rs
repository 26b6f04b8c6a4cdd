//! Time sources for sessions.
//!
//! The rate gate works on monotonic instants, while emitted records carry
//! wall-clock stamps. A `Tick` pairs both so one call yields a consistent
//! reading.

use std::cell::Cell;
use std::time::{Duration, Instant};

use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub instant: Instant,
    pub wall: OffsetDateTime,
}

pub trait Clock {
    fn now(&self) -> Tick;
}

/// Reads the system clocks; wall time is UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        Tick {
            instant: Instant::now(),
            wall: OffsetDateTime::now_utc(),
        }
    }
}

/// Deterministic clock advancing by `step` on every call.
///
/// The first call returns the origin.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use time::OffsetDateTime;
/// use velosense_core::{Clock, StepClock};
///
/// let clock = StepClock::new(OffsetDateTime::UNIX_EPOCH, Duration::from_millis(10));
/// let first = clock.now();
/// let second = clock.now();
/// assert_eq!(second.instant - first.instant, Duration::from_millis(10));
/// assert_eq!(first.wall, OffsetDateTime::UNIX_EPOCH);
/// ```
#[derive(Debug)]
pub struct StepClock {
    origin: Instant,
    wall_origin: OffsetDateTime,
    step: Duration,
    ticks: Cell<u64>,
}

impl StepClock {
    pub fn new(wall_origin: OffsetDateTime, step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            wall_origin,
            step,
            ticks: Cell::new(0),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

/// `step * ticks`, saturating at `Duration::MAX`.
fn elapsed(step: Duration, ticks: u64) -> Duration {
    let nanos = step.as_nanos().saturating_mul(u128::from(ticks));
    let secs = u64::try_from(nanos / 1_000_000_000).unwrap_or(u64::MAX);
    // Always below one second, so it fits in u32.
    let subsec = (nanos % 1_000_000_000) as u32;
    if secs == u64::MAX {
        return Duration::MAX;
    }
    Duration::new(secs, subsec)
}

impl Clock for StepClock {
    fn now(&self) -> Tick {
        let ticks = self.ticks.get();
        self.ticks.set(ticks.saturating_add(1));
        let elapsed = elapsed(self.step, ticks);
        Tick {
            instant: self.origin + elapsed,
            wall: self.wall_origin + elapsed,
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::OffsetDateTime;

    use super::{Clock, StepClock, SystemClock, elapsed};

    #[test]
    fn step_clock_advances_both_readings() {
        let clock = StepClock::new(OffsetDateTime::UNIX_EPOCH, Duration::from_millis(250));
        let ticks: Vec<_> = (0..3).map(|_| clock.now()).collect();
        assert_eq!(ticks[2].instant - ticks[0].instant, Duration::from_millis(500));
        assert_eq!(
            ticks[2].wall,
            OffsetDateTime::UNIX_EPOCH + Duration::from_millis(500)
        );
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn elapsed_keeps_growing_past_u32_ticks() {
        let step = Duration::from_millis(1);
        let ticks = u64::from(u32::MAX);
        assert!(elapsed(step, ticks + 1) > elapsed(step, ticks));
        assert_eq!(elapsed(step, ticks + 1), Duration::from_millis(ticks + 1));
        assert_eq!(elapsed(Duration::MAX, 2), Duration::MAX);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b.instant >= a.instant);
    }
}
