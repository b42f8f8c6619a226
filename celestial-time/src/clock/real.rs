use super::ClockSource;
use chrono::Utc;

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for RealClock {
    fn time_in_millis_since_epoch(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_clock_is_after_2020_and_monotone_enough() {
        let clock = RealClock::new();
        let a = clock.time_in_millis_since_epoch();
        let b = clock.time_in_millis_since_epoch();
        // 2020-01-01T00:00:00Z
        assert!(a > 1_577_836_800_000);
        assert!(b >= a);
    }
}
