//! Time for device pointing: Julian dates, mean sidereal time and the
//! clocks the pointing engine reads "now" from.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`julian`] | Two-part Julian Date built from Unix milliseconds |
//! | [`sidereal`] | Local mean sidereal time and the zenith RA/Dec |
//! | [`clock`] | Real, fixed and time-travel clocks behind [`ClockSource`] |

pub mod clock;
pub mod julian;
pub mod sidereal;

pub use clock::{ClockSource, ClockState, FixedClock, RealClock, TimeTravelClock, TimeTravelListener};
pub use julian::JulianDate;
pub use sidereal::{mean_sidereal_time, zenith_ra_dec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl From<celestial_core::AstroError> for TimeError {
    fn from(err: celestial_core::AstroError) -> Self {
        TimeError::CalculationError(err.to_string())
    }
}
