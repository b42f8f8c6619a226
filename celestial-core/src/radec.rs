//! Equatorial sky positions and their unit-vector form.
//!
//! The celestial frame used throughout the pointing engine has +X toward
//! (RA 0°, Dec 0°), +Y toward (RA 90°, Dec 0°) and +Z toward the north
//! celestial pole. [`geocentric_coords`] maps an [`RaDec`] onto that frame and
//! [`RaDec::from_vector`] maps back.

use crate::constants::RAD_TO_DEG;
use crate::matrix::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Right ascension and declination, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RaDec {
    /// Right ascension in degrees, [0, 360) when produced by this crate.
    pub ra: f64,
    /// Declination in degrees, [-90, 90].
    pub dec: f64,
}

impl RaDec {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Direction of a (not necessarily unit) vector in the celestial frame.
    ///
    /// RA is wrapped into [0, 360). The zero vector maps to (0, 0).
    pub fn from_vector(v: &Vector3) -> Self {
        let d2 = v.x * v.x + v.y * v.y;
        let ra = if d2 == 0.0 {
            0.0
        } else {
            libm::atan2(v.y, v.x) * RAD_TO_DEG
        };
        let dec = if v.z == 0.0 {
            0.0
        } else {
            libm::atan2(v.z, libm::sqrt(d2)) * RAD_TO_DEG
        };
        Self::new(ra.rem_euclid(360.0), dec)
    }
}

impl fmt::Display for RaDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RA {:.4}° Dec {:+.4}°", self.ra, self.dec)
    }
}

/// Unit vector in the celestial frame for a sky position.
///
/// ```
/// use celestial_core::{geocentric_coords, RaDec};
///
/// let pole = geocentric_coords(&RaDec::new(0.0, 90.0));
/// assert!((pole.z - 1.0).abs() < 1e-15);
/// ```
pub fn geocentric_coords(radec: &RaDec) -> Vector3 {
    let (sin_ra, cos_ra) = libm::sincos(radec.ra.to_radians());
    let (sin_dec, cos_dec) = libm::sincos(radec.dec.to_radians());
    Vector3::new(cos_ra * cos_dec, sin_ra * cos_dec, sin_dec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_geocentric_axes() {
        let x = geocentric_coords(&RaDec::new(0.0, 0.0));
        assert_abs_diff_eq!(x.x, 1.0, epsilon = 1e-15);

        let y = geocentric_coords(&RaDec::new(90.0, 0.0));
        assert_abs_diff_eq!(y.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(y.y, 1.0, epsilon = 1e-15);

        let south = geocentric_coords(&RaDec::new(123.0, -90.0));
        assert_abs_diff_eq!(south.z, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_geocentric_is_unit_length() {
        for &(ra, dec) in &[(12.5, 33.0), (280.461, 0.0), (359.9, -71.2)] {
            let v = geocentric_coords(&RaDec::new(ra, dec));
            assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_from_vector_wraps_ra() {
        let radec = RaDec::from_vector(&Vector3::new(0.0, -1.0, 0.0));
        assert_abs_diff_eq!(radec.ra, 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(radec.dec, 0.0, epsilon = 1e-12);

        let back = RaDec::from_vector(&geocentric_coords(&RaDec::new(200.0, 45.0)));
        assert_abs_diff_eq!(back.ra, 200.0, epsilon = 1e-10);
        assert_abs_diff_eq!(back.dec, 45.0, epsilon = 1e-10);
    }

    #[test]
    fn test_from_vector_pole_and_zero() {
        let pole = RaDec::from_vector(&Vector3::z_axis());
        assert_eq!(pole.ra, 0.0);
        assert_abs_diff_eq!(pole.dec, 90.0, epsilon = 1e-12);
        assert_eq!(RaDec::from_vector(&Vector3::zeros()), RaDec::new(0.0, 0.0));
    }
}
