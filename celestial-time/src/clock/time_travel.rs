//! A switchable clock for showing the sky at other moments.
//!
//! [`TimeTravelClock`] is a three-state machine:
//!
//! ```text
//!            travel_to_time(t, frozen)      toggle_frozen()
//!   Real ───────────────────────────▶ Frozen(t) ◀──────────▶ RunningWithOffset(o)
//!    ▲                                   │                          │
//!    └──────── return_to_real_time() ────┴──────────────────────────┘
//! ```
//!
//! - `Real` reports the wall clock.
//! - `Frozen(v)` reports `v` no matter how much wall time passes.
//! - `RunningWithOffset(o)` reports wall time + `o`, so simulated time keeps
//!   ticking at the real rate.
//!
//! Toggling between the frozen and running states preserves the reported
//! instant at the moment of the toggle.
//!
//! Listener callbacks run synchronously on the calling thread after the
//! internal lock has been released, so a listener may read the clock.

use super::{ClockSource, RealClock};
use crate::{TimeError, TimeResult};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// Observer for time-travel changes.
pub trait TimeTravelListener: Send + Sync {
    /// Time travel was switched on (`true`) or back to real time (`false`).
    fn on_time_travel_state_changed(&self, active: bool);

    /// The effective time changed discontinuously to `time_millis`.
    fn on_time_travel_time_changed(&self, time_millis: i64);
}

/// Current mode of a [`TimeTravelClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Real,
    Frozen(i64),
    RunningWithOffset(i64),
}

#[derive(Debug, Clone, Copy)]
enum Event {
    StateChanged(bool),
    TimeChanged(i64),
}

/// Clock that can run in real time, stand still, or run shifted.
pub struct TimeTravelClock {
    wall: Arc<dyn ClockSource>,
    state: Mutex<ClockState>,
    listener: Mutex<Option<Arc<dyn TimeTravelListener>>>,
}

impl Default for TimeTravelClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimeTravelClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeTravelClock")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl TimeTravelClock {
    /// A time-travel clock driven by the system wall clock, starting in `Real`.
    pub fn new() -> Self {
        Self::with_wall_clock(Arc::new(RealClock::new()))
    }

    /// A time-travel clock driven by an arbitrary wall clock.
    pub fn with_wall_clock(wall: Arc<dyn ClockSource>) -> Self {
        Self {
            wall,
            state: Mutex::new(ClockState::Real),
            listener: Mutex::new(None),
        }
    }

    pub fn set_listener(&self, listener: Option<Arc<dyn TimeTravelListener>>) {
        *self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = listener;
    }

    pub fn state(&self) -> ClockState {
        *self.lock_state()
    }

    pub fn is_time_travel_active(&self) -> bool {
        self.state() != ClockState::Real
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state(), ClockState::Frozen(_))
    }

    /// Jumps to `target_millis`, either frozen there or running from there.
    pub fn travel_to_time(&self, target_millis: i64, frozen: bool) {
        let now = self.wall_now();
        {
            let mut state = self.lock_state();
            *state = if frozen {
                ClockState::Frozen(target_millis)
            } else {
                ClockState::RunningWithOffset(target_millis.saturating_sub(now))
            };
        }
        info!(target_millis, frozen, "time travel started");
        self.notify(&[Event::StateChanged(true), Event::TimeChanged(target_millis)]);
    }

    /// Jumps to a UTC calendar instant and freezes there.
    ///
    /// `month` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidDate`] for impossible calendar values
    /// (February 30, hour 24, ...).
    pub fn travel_to_date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> TimeResult<()> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                TimeError::InvalidDate(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}",
                    year, month, day, hour, minute
                ))
            })?;
        let millis = Utc.from_utc_datetime(&naive).timestamp_millis();
        self.travel_to_time(millis, true);
        Ok(())
    }

    /// Shifts the effective time by `delta_millis`.
    ///
    /// From `Real` this starts time travel, frozen at now + delta.
    pub fn adjust_time(&self, delta_millis: i64) {
        let now = self.wall_now();
        let event = {
            let mut state = self.lock_state();
            match *state {
                ClockState::Real => None,
                ClockState::Frozen(v) => {
                    let v = v.saturating_add(delta_millis);
                    *state = ClockState::Frozen(v);
                    Some(v)
                }
                ClockState::RunningWithOffset(o) => {
                    let o = o.saturating_add(delta_millis);
                    *state = ClockState::RunningWithOffset(o);
                    Some(now.saturating_add(o))
                }
            }
        };

        match event {
            Some(effective) => self.notify(&[Event::TimeChanged(effective)]),
            None => self.travel_to_time(now.saturating_add(delta_millis), true),
        }
    }

    /// Switches between frozen and running without changing the reported instant.
    ///
    /// Does nothing while in `Real`.
    pub fn toggle_frozen(&self) {
        let now = self.wall_now();
        let mut state = self.lock_state();
        *state = match *state {
            ClockState::Real => return,
            ClockState::Frozen(v) => ClockState::RunningWithOffset(v.saturating_sub(now)),
            ClockState::RunningWithOffset(o) => ClockState::Frozen(now.saturating_add(o)),
        };
    }

    /// Leaves time travel and reports the wall clock again.
    pub fn return_to_real_time(&self) {
        *self.lock_state() = ClockState::Real;
        let now = self.wall_now();
        info!("returned to real time");
        self.notify(&[Event::StateChanged(false), Event::TimeChanged(now)]);
    }

    fn wall_now(&self) -> i64 {
        self.wall.time_in_millis_since_epoch()
    }

    fn lock_state(&self) -> MutexGuard<'_, ClockState> {
        // ClockState is Copy and always valid, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, events: &[Event]) {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(listener) = listener else {
            return;
        };
        for event in events {
            match *event {
                Event::StateChanged(active) => listener.on_time_travel_state_changed(active),
                Event::TimeChanged(millis) => listener.on_time_travel_time_changed(millis),
            }
        }
    }
}

impl ClockSource for TimeTravelClock {
    fn time_in_millis_since_epoch(&self) -> i64 {
        match self.state() {
            ClockState::Real => self.wall_now(),
            ClockState::Frozen(v) => v,
            ClockState::RunningWithOffset(o) => self.wall_now().saturating_add(o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const WALL_START: i64 = 1_700_000_000_000;
    const TARGET: i64 = 946_728_000_000;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }
    }

    impl TimeTravelListener for Recorder {
        fn on_time_travel_state_changed(&self, active: bool) {
            self.events.lock().unwrap().push(format!("state:{}", active));
        }

        fn on_time_travel_time_changed(&self, time_millis: i64) {
            self.events.lock().unwrap().push(format!("time:{}", time_millis));
        }
    }

    fn clock_with_wall() -> (TimeTravelClock, Arc<FixedClock>, Arc<Recorder>) {
        let wall = Arc::new(FixedClock::new(WALL_START));
        let clock = TimeTravelClock::with_wall_clock(wall.clone());
        let recorder = Arc::new(Recorder::default());
        clock.set_listener(Some(recorder.clone()));
        (clock, wall, recorder)
    }

    #[test]
    fn test_starts_in_real_time() {
        let (clock, wall, recorder) = clock_with_wall();
        assert_eq!(clock.state(), ClockState::Real);
        assert!(!clock.is_time_travel_active());
        assert_eq!(clock.time_in_millis_since_epoch(), WALL_START);
        wall.advance(1234);
        assert_eq!(clock.time_in_millis_since_epoch(), WALL_START + 1234);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_frozen_travel_ignores_wall_time() {
        let (clock, wall, recorder) = clock_with_wall();
        clock.travel_to_time(TARGET, true);
        assert_eq!(clock.state(), ClockState::Frozen(TARGET));
        assert!(clock.is_frozen());
        wall.advance(3_600_000);
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET);
        assert_eq!(
            recorder.take(),
            vec!["state:true".to_string(), format!("time:{}", TARGET)]
        );
    }

    #[test]
    fn test_running_travel_keeps_ticking() {
        let (clock, wall, _) = clock_with_wall();
        clock.travel_to_time(TARGET, false);
        assert_eq!(
            clock.state(),
            ClockState::RunningWithOffset(TARGET - WALL_START)
        );
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET);
        wall.advance(5_000);
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET + 5_000);
    }

    #[test]
    fn test_adjust_from_real_starts_frozen_travel() {
        let (clock, _, recorder) = clock_with_wall();
        clock.adjust_time(-60_000);
        assert_eq!(clock.state(), ClockState::Frozen(WALL_START - 60_000));
        assert_eq!(
            recorder.take(),
            vec![
                "state:true".to_string(),
                format!("time:{}", WALL_START - 60_000)
            ]
        );
    }

    #[test]
    fn test_adjust_frozen_and_running() {
        let (clock, wall, recorder) = clock_with_wall();
        clock.travel_to_time(TARGET, true);
        recorder.take();

        clock.adjust_time(86_400_000);
        assert_eq!(clock.state(), ClockState::Frozen(TARGET + 86_400_000));
        assert_eq!(recorder.take(), vec![format!("time:{}", TARGET + 86_400_000)]);

        clock.travel_to_time(TARGET, false);
        recorder.take();
        wall.advance(10);
        clock.adjust_time(1_000);
        assert_eq!(
            clock.state(),
            ClockState::RunningWithOffset(TARGET - WALL_START + 1_000)
        );
        assert_eq!(recorder.take(), vec![format!("time:{}", TARGET + 1_010)]);
    }

    #[test]
    fn test_toggle_preserves_effective_time() {
        let (clock, wall, recorder) = clock_with_wall();
        clock.travel_to_time(TARGET, true);
        clock.adjust_time(0);
        wall.advance(42_000);
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET);
        recorder.take();

        clock.toggle_frozen();
        assert!(!clock.is_frozen());
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET);

        wall.advance(7_000);
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET + 7_000);

        clock.toggle_frozen();
        assert_eq!(clock.state(), ClockState::Frozen(TARGET + 7_000));
        wall.advance(7_000);
        assert_eq!(clock.time_in_millis_since_epoch(), TARGET + 7_000);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_toggle_in_real_time_is_noop() {
        let (clock, _, _) = clock_with_wall();
        clock.toggle_frozen();
        assert_eq!(clock.state(), ClockState::Real);
    }

    #[test]
    fn test_return_to_real_time() {
        let (clock, wall, recorder) = clock_with_wall();
        clock.travel_to_time(TARGET, false);
        recorder.take();
        wall.advance(99);

        clock.return_to_real_time();
        assert_eq!(clock.state(), ClockState::Real);
        assert_eq!(clock.time_in_millis_since_epoch(), WALL_START + 99);
        assert_eq!(
            recorder.take(),
            vec![
                "state:false".to_string(),
                format!("time:{}", WALL_START + 99)
            ]
        );

        // A later adjust starts from the wall clock, not from any stale offset.
        clock.adjust_time(1);
        assert_eq!(clock.state(), ClockState::Frozen(WALL_START + 100));
    }

    #[test]
    fn test_travel_to_date_time() {
        let (clock, _, _) = clock_with_wall();
        clock.travel_to_date_time(2000, 1, 1, 12, 0).unwrap();
        assert_eq!(clock.state(), ClockState::Frozen(TARGET));

        let err = clock.travel_to_date_time(2023, 2, 30, 0, 0).unwrap_err();
        assert!(matches!(err, TimeError::InvalidDate(_)));
        assert_eq!(clock.state(), ClockState::Frozen(TARGET));
    }

    #[test]
    fn test_listener_can_read_clock_during_callback() {
        struct Reader {
            clock: Mutex<Option<Arc<TimeTravelClock>>>,
            seen: Mutex<Vec<i64>>,
        }

        impl TimeTravelListener for Reader {
            fn on_time_travel_state_changed(&self, _active: bool) {}

            fn on_time_travel_time_changed(&self, _time_millis: i64) {
                if let Some(clock) = self.clock.lock().unwrap().as_ref() {
                    self.seen
                        .lock()
                        .unwrap()
                        .push(clock.time_in_millis_since_epoch());
                }
            }
        }

        let clock = Arc::new(TimeTravelClock::with_wall_clock(Arc::new(FixedClock::new(
            WALL_START,
        ))));
        let reader = Arc::new(Reader {
            clock: Mutex::new(Some(clock.clone())),
            seen: Mutex::new(Vec::new()),
        });
        clock.set_listener(Some(reader.clone()));
        clock.travel_to_time(TARGET, true);
        assert_eq!(*reader.seen.lock().unwrap(), vec![TARGET]);

        // break the Arc cycle
        reader.clock.lock().unwrap().take();
    }
}
