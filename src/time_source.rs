//! Time source abstraction for supporting both real and test-driven time.
//!
//! The scheduler never reads `Local::now()` directly; it goes through a
//! `TimeSource` so tests can pin the clock to a known instant and simulate
//! out-of-band clock jumps without waiting for real time to pass.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::sync::Mutex;

/// Trait for abstracting wall-clock reads.
pub trait TimeSource: Send + Sync {
    /// Get the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Real-time implementation that uses the actual system clock.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed, manually-advanced time source for tests.
///
/// The clock only moves when `set` or `advance` is called, which makes
/// deadline arithmetic deterministic and lets tests model clock jumps.
pub struct FixedTimeSource {
    current: Mutex<DateTime<Local>>,
}

impl FixedTimeSource {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Jump the clock to an absolute instant (forwards or backwards).
    pub fn set(&self, instant: DateTime<Local>) {
        *self.current.lock().unwrap() = instant;
    }

    /// Move the clock forward (or backward, with a negative duration).
    pub fn advance(&self, delta: ChronoDuration) {
        let mut guard = self.current.lock().unwrap();
        *guard += delta;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap()
    }
}
