//! Microsecond time sources.
//!
//! Time is a wrapping `u32` count of microseconds, like a microcontroller's
//! free-running timer. The player only ever looks at differences, so a wrap
//! roughly every 71 minutes is harmless.

use alloc::rc::Rc;
use core::cell::Cell;

/// A free-running microsecond counter.
pub trait Clock {
    fn now_micros(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now_micros(&self) -> u32 {
        self()
    }
}

/// Wall-clock time since construction.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_micros(&self) -> u32 {
        self.origin.elapsed().as_micros() as u32
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// Used for offline rendering and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, micros: u32) {
        self.now.set(micros);
    }

    pub fn advance(&self, micros: u32) {
        self.now.set(self.now.get().wrapping_add(micros));
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(250);
        assert_eq!(other.now_micros(), 250);
        other.set(10);
        assert_eq!(clock.now_micros(), 10);
    }

    #[test]
    fn manual_clock_wraps() {
        let clock = ManualClock::new();
        clock.set(u32::MAX);
        clock.advance(2);
        assert_eq!(clock.now_micros(), 1);
    }

    #[test]
    fn closures_are_clocks() {
        let clock = || 42u32;
        assert_eq!(clock.now_micros(), 42);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_clock_is_monotonic() {
        let clock = StdClock::new();
        let a = clock.now_micros();
        let b = clock.now_micros();
        assert!(b >= a);
    }
}
