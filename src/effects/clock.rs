//! Time sources for the run loop.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Monotonic millisecond clock.
///
/// `sleep_until` is the run loop's only suspension point. Implementations
/// may return before the deadline; the loop re-reads `now_ms` and waits
/// again if needed.
pub trait Clock {
    /// Current time in milliseconds. Never decreases.
    fn now_ms(&self) -> u64;

    /// Block until `now_ms() >= deadline_ms`, or for some shorter slice.
    fn sleep_until(&self, deadline_ms: u64);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn sleep_until(&self, deadline_ms: u64) {
        (**self).sleep_until(deadline_ms)
    }
}

/// Wall-clock backed monotonic time, measured from construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
    poll_interval: Duration,
}

impl MonotonicClock {
    /// Default upper bound on one sleep slice.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new() -> Self {
        Self::with_poll_interval(Self::DEFAULT_POLL_INTERVAL)
    }

    /// Sleep in slices of at most `poll_interval`, so a stop request is
    /// noticed within one slice.
    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            poll_interval,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn sleep_until(&self, deadline_ms: u64) {
        let remaining = deadline_ms.saturating_sub(self.now_ms());
        if remaining > 0 {
            thread::sleep(Duration::from_millis(remaining).min(self.poll_interval));
        }
    }
}

/// Deterministic clock that only moves when told to.
///
/// Sleeping jumps straight to the deadline, so a run loop driven by a
/// `ManualClock` finishes instantly with exact, predictable timestamps.
///
/// # Example
///
/// ```rust
/// use operator_fsm::effects::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0);
/// clock.advance(250);
/// assert_eq!(clock.now_ms(), 250);
///
/// clock.sleep_until(1_000);
/// assert_eq!(clock.now_ms(), 1_000);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Move to `ms`. Earlier values are ignored to keep time monotonic.
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_until(&self, deadline_ms: u64) {
        self.set(deadline_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_goes_back() {
        let clock = ManualClock::new(500);
        clock.set(100);
        assert_eq!(clock.now_ms(), 500);

        clock.sleep_until(200);
        assert_eq!(clock.now_ms(), 500);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::default();
        clock.advance(10);
        clock.advance(15);
        assert_eq!(clock.now_ms(), 25);
    }

    #[test]
    fn monotonic_clock_does_not_decrease() {
        let clock = MonotonicClock::with_poll_interval(Duration::from_millis(1));
        let first = clock.now_ms();
        clock.sleep_until(first + 2);
        assert!(clock.now_ms() >= first);
    }

    #[test]
    fn monotonic_sleep_is_bounded_by_poll_interval() {
        let clock = MonotonicClock::with_poll_interval(Duration::from_millis(5));
        let start = Instant::now();
        clock.sleep_until(clock.now_ms() + 60_000);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn clock_works_through_a_reference() {
        fn read(clock: impl Clock) -> u64 {
            clock.now_ms()
        }

        let clock = ManualClock::new(42);
        assert_eq!(read(&clock), 42);
    }
}
