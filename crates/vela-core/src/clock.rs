#![forbid(unsafe_code)]

//! Clock sources for driving controllers.
//!
//! Controllers never call `Instant::now()` themselves; the host reads a clock
//! once per event-loop turn and passes the same `now` to every controller it
//! pumps. That keeps a turn internally consistent and makes the whole system
//! drivable from a [`ManualClock`] in tests.

use std::time::{Duration, Instant};

/// A source of monotonic time.
pub trait Clock {
    /// The current instant according to this clock.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    /// Create a new monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests and deterministic hosts.
///
/// Time only moves when the owner says so, and never backwards.
///
/// # Example
///
/// ```
/// use vela_core::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let mut clock = ManualClock::new();
/// let t0 = clock.now();
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(clock.now() - t0, Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Instant,
}

impl ManualClock {
    /// Create a manual clock anchored at the current wall instant.
    ///
    /// The anchor only provides a valid `Instant` origin; all subsequent
    /// movement is explicit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Instant::now(),
        }
    }

    /// Create a manual clock anchored at a specific instant.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { current: start }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.current += delta;
    }

    /// Jump the clock to `instant`.
    ///
    /// Monotonicity is preserved: an `instant` earlier than the current time
    /// is ignored.
    pub fn set(&mut self, instant: Instant) {
        self.current = self.current.max(instant);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_anchor() {
        let anchor = Instant::now();
        let clock = ManualClock::starting_at(anchor);
        assert_eq!(clock.now(), anchor);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = ManualClock::new();
        let t0 = clock.now();

        clock.advance(Duration::from_millis(100));
        clock.advance(Duration::from_millis(250));

        assert_eq!(clock.now() - t0, Duration::from_millis(350));
    }

    #[test]
    fn advance_by_zero_is_a_noop() {
        let mut clock = ManualClock::new();
        let before = clock.now();
        clock.advance(Duration::ZERO);
        assert_eq!(clock.now(), before);
    }

    #[test]
    fn set_never_moves_backwards() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_secs(10));
        let t = clock.now();

        clock.set(t - Duration::from_secs(5));
        assert_eq!(clock.now(), t);

        clock.set(t + Duration::from_secs(1));
        assert_eq!(clock.now(), t + Duration::from_secs(1));
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
