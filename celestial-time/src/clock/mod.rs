//! Sources of "now" for the pointing engine.
//!
//! Everything time-dependent in the engine reads the current instant through
//! [`ClockSource`], so the sky can be shown for any moment by swapping the
//! clock:
//!
//! | Clock | Behaviour |
//! |-------|-----------|
//! | [`RealClock`] | System wall clock |
//! | [`FixedClock`] | A stored instant that only moves when told to |
//! | [`TimeTravelClock`] | Real, frozen, or offset time, switchable at runtime |
//!
//! All clocks are `Send + Sync` and are shared as `Arc<dyn ClockSource>`.

mod fixed;
mod real;
mod time_travel;

pub use fixed::FixedClock;
pub use real::RealClock;
pub use time_travel::{ClockState, TimeTravelClock, TimeTravelListener};

/// Supplies the current time in milliseconds since the Unix epoch.
///
/// Implementations must be cheap and non-blocking; the engine reads the clock
/// on every pointing update.
pub trait ClockSource: Send + Sync {
    fn time_in_millis_since_epoch(&self) -> i64;
}
