use super::ClockSource;
use std::sync::atomic::{AtomicI64, Ordering};

/// A clock that reports a stored instant.
///
/// Installed by `PointingEngine::set_time` to pin the sky to one moment, and
/// handy in tests as a wall clock that only advances on request.
///
/// ```
/// use celestial_time::clock::{ClockSource, FixedClock};
///
/// let clock = FixedClock::new(1_000);
/// clock.advance(500);
/// assert_eq!(clock.time_in_millis_since_epoch(), 1_500);
/// ```
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_millis: i64) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl ClockSource for FixedClock {
    fn time_in_millis_since_epoch(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
