//! Mean sidereal time and the zenith position it implies.
//!
//! A low-precision linear model is enough here: the result orients a
//! hand-held device, and sensor noise is measured in degrees. Nutation,
//! UT1−UTC and the polynomial GMST terms are all below that floor.
//!
//! ```
//! use celestial_core::LatLong;
//! use celestial_time::sidereal::zenith_ra_dec;
//!
//! let here = LatLong::new(35.0, 0.0)?;
//! let zenith = zenith_ra_dec(946_728_000_000, &here); // J2000.0
//! assert!((zenith.ra - 280.461).abs() < 1e-9);
//! assert_eq!(zenith.dec, 35.0);
//! # Ok::<(), celestial_core::AstroError>(())
//! ```

use crate::JulianDate;
use celestial_core::constants::{GMST_AT_J2000_DEG, SIDEREAL_DEG_PER_DAY};
use celestial_core::{LatLong, RaDec};

/// Local mean sidereal time in degrees, normalized to [0, 360).
///
/// `longitude` is in degrees, east positive.
pub fn mean_sidereal_time(jd: &JulianDate, longitude: f64) -> f64 {
    let gst = GMST_AT_J2000_DEG + SIDEREAL_DEG_PER_DAY * jd.days_since_j2000();
    normalize_degrees(gst + longitude)
}

/// RA/Dec of the point directly overhead.
///
/// The zenith sits on the local meridian, so its RA is the local sidereal time
/// and its declination equals the observer's latitude.
pub fn zenith_ra_dec(time_millis: i64, location: &LatLong) -> RaDec {
    let jd = JulianDate::from_unix_millis(time_millis);
    RaDec::new(
        mean_sidereal_time(&jd, location.longitude()),
        location.latitude(),
    )
}

fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
