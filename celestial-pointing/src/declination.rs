//! Magnetic declination: the angle from true North to magnetic North.
//!
//! Compass-derived North is corrected by rotating the celestial axes about the
//! zenith by the declination. Providers cache a value for the last location
//! and time they were given; the engine pushes a fresh location and time
//! before every read.
//!
//! | Provider | Declination |
//! |----------|-------------|
//! | [`ZeroDeclination`] | Always 0, i.e. no correction |
//! | [`FixedDeclination`] | A constant chosen by the caller |
//! | [`DipoleDeclination`] | Tilted-dipole geomagnetic model, a few degrees to tens of degrees off near strong anomalies |
//!
//! Positive declination means magnetic North lies east of true North.

use celestial_core::constants::{DAYS_PER_JULIAN_YEAR, DEG_TO_RAD, MILLISECONDS_PER_DAY, RAD_TO_DEG};
use celestial_core::LatLong;

/// Source of magnetic declination for the pointing engine.
pub trait DeclinationProvider: Send {
    /// Declination in degrees for the last location and time supplied.
    fn declination(&self) -> f64;

    /// Recomputes the cached declination.
    fn set_location_and_time(&mut self, location: &LatLong, time_millis: i64);
}

/// No magnetic correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroDeclination;

impl DeclinationProvider for ZeroDeclination {
    fn declination(&self) -> f64 {
        0.0
    }

    fn set_location_and_time(&mut self, _location: &LatLong, _time_millis: i64) {}
}

/// A declination that ignores location and time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedDeclination {
    degrees: f64,
}

impl FixedDeclination {
    pub fn new(degrees: f64) -> Self {
        Self { degrees }
    }
}

impl DeclinationProvider for FixedDeclination {
    fn declination(&self) -> f64 {
        self.degrees
    }

    fn set_location_and_time(&mut self, _location: &LatLong, _time_millis: i64) {}
}

/// IGRF-13 degree-1 Gauss coefficients at epoch 2020.0, in nT.
const DIPOLE_EPOCH_YEAR: f64 = 2020.0;
const G10: f64 = -29404.8;
const G11: f64 = -1450.9;
const H11: f64 = 4652.5;

/// Secular variation of the coefficients above, in nT per year.
const G10_SV: f64 = 5.7;
const G11_SV: f64 = 7.4;
const H11_SV: f64 = -25.9;

/// Declination from the tilted geomagnetic dipole.
///
/// Uses only the degree-1 terms of the International Geomagnetic Reference
/// Field, extrapolated linearly in time from 2020.0. The dipole captures the
/// broad east/west pattern of declination but not regional anomalies, so it
/// can be off by well over ten degrees in places. Altitude is ignored.
///
/// Starts at 0 until a location and time are supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DipoleDeclination {
    degrees: f64,
}

impl DipoleDeclination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declination in degrees at `location` and `time_millis`, without caching.
    pub fn compute(location: &LatLong, time_millis: i64) -> f64 {
        let years = decimal_year(time_millis) - DIPOLE_EPOCH_YEAR;
        let g10 = G10 + G10_SV * years;
        let g11 = G11 + G11_SV * years;
        let h11 = H11 + H11_SV * years;

        let colatitude = (90.0 - location.latitude()) * DEG_TO_RAD;
        let (sin_theta, cos_theta) = libm::sincos(colatitude);
        let (sin_phi, cos_phi) = libm::sincos(location.longitude_radians());

        // Horizontal field components at the surface (common factors dropped).
        let north = -g10 * sin_theta + (g11 * cos_phi + h11 * sin_phi) * cos_theta;
        let east = g11 * sin_phi - h11 * cos_phi;

        libm::atan2(east, north) * RAD_TO_DEG
    }
}

impl DeclinationProvider for DipoleDeclination {
    fn declination(&self) -> f64 {
        self.degrees
    }

    fn set_location_and_time(&mut self, location: &LatLong, time_millis: i64) {
        self.degrees = Self::compute(location, time_millis);
    }
}

fn decimal_year(time_millis: i64) -> f64 {
    1970.0 + time_millis as f64 / (DAYS_PER_JULIAN_YEAR * MILLISECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // 2020-01-01T00:00:00Z
    const MILLIS_2020: i64 = 1_577_836_800_000;

    fn at(lat: f64, lon: f64) -> LatLong {
        LatLong::new(lat, lon).unwrap()
    }

    #[test]
    fn test_zero_and_fixed() {
        let mut zero = ZeroDeclination;
        zero.set_location_and_time(&at(40.0, -100.0), MILLIS_2020);
        assert_eq!(zero.declination(), 0.0);

        let mut fixed = FixedDeclination::new(-7.5);
        fixed.set_location_and_time(&at(10.0, 10.0), 0);
        assert_eq!(fixed.declination(), -7.5);
    }

    #[test]
    fn test_dipole_starts_at_zero_and_caches() {
        let mut dipole = DipoleDeclination::new();
        assert_eq!(dipole.declination(), 0.0);
        let loc = at(37.77, -122.42);
        dipole.set_location_and_time(&loc, MILLIS_2020);
        assert_eq!(
            dipole.declination(),
            DipoleDeclination::compute(&loc, MILLIS_2020)
        );
    }

    #[test]
    fn test_dipole_on_prime_meridian_equator() {
        // theta = 90 deg: north = -g10, east = -h11 at epoch 2020.0
        let years = decimal_year(MILLIS_2020) - DIPOLE_EPOCH_YEAR;
        let expected = libm::atan2(-(H11 + H11_SV * years), -(G10 + G10_SV * years)) * RAD_TO_DEG;
        let d = DipoleDeclination::compute(&at(0.0, 0.0), MILLIS_2020);
        assert_abs_diff_eq!(d, expected, epsilon = 1e-12);
        assert!(d < -8.0 && d > -10.0, "declination {}", d);
    }

    #[test]
    fn test_dipole_sign_follows_pole_offset() {
        // The geomagnetic north pole lies over northern Canada, so compasses on
        // the North American west coast point east of true North.
        let west_coast = DipoleDeclination::compute(&at(37.77, -122.42), MILLIS_2020);
        assert!(west_coast > 5.0 && west_coast < 20.0, "{}", west_coast);

        // East of the pole's meridian the dipole swings compasses west.
        let london = DipoleDeclination::compute(&at(51.5, 0.0), MILLIS_2020);
        assert!(london < -10.0 && london > -20.0, "{}", london);
    }

    #[test]
    fn test_dipole_drifts_with_time() {
        let loc = at(45.0, 10.0);
        let d2020 = DipoleDeclination::compute(&loc, MILLIS_2020);
        let d2030 = DipoleDeclination::compute(&loc, MILLIS_2020 + 10 * 31_557_600_000);
        assert!((d2030 - d2020).abs() > 1e-3);
        assert!((d2030 - d2020).abs() < 2.0);
    }

    #[test]
    fn test_decimal_year() {
        assert_abs_diff_eq!(decimal_year(0), 1970.0, epsilon = 1e-12);
        assert_abs_diff_eq!(decimal_year(946_728_000_000), 2000.0, epsilon = 1e-9);
    }
}
