//! Observer position on Earth.
//!
//! Device pointing only needs latitude and longitude: the zenith direction
//! depends on nothing else, and the few arcseconds separating geodetic from
//! geocentric latitude are far below sensor noise. Height is not modelled.
//!
//! # Coordinate conventions
//!
//! - **Latitude**: degrees, north positive, range [-90, 90]
//! - **Longitude**: degrees, east positive, range [-180, 180]
//!
//! Both are validated on construction, so a `LatLong` is always finite and in
//! range.
//!
//! ```
//! use celestial_core::LatLong;
//!
//! let greenwich = LatLong::new(51.4769, -0.0005)?;
//! assert!((greenwich.latitude() - 51.4769).abs() < 1e-12);
//! assert!(LatLong::new(f64::NAN, 0.0).is_err());
//! # Ok::<(), celestial_core::AstroError>(())
//! ```

use crate::errors::{AstroError, AstroResult, MathErrorKind};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A validated geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLong {
    latitude: f64,
    longitude: f64,
}

impl LatLong {
    /// Creates a location from degrees.
    ///
    /// # Errors
    ///
    /// Returns [`MathErrorKind::NotFinite`] for NaN or infinite input and
    /// [`MathErrorKind::OutOfRange`] when latitude is outside [-90, 90] or
    /// longitude outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> AstroResult<Self> {
        if !latitude.is_finite() {
            return Err(AstroError::math_error(
                "latlong_validation",
                MathErrorKind::NotFinite,
                "Latitude degrees must be finite",
            ));
        }
        if !longitude.is_finite() {
            return Err(AstroError::math_error(
                "latlong_validation",
                MathErrorKind::NotFinite,
                "Longitude degrees must be finite",
            ));
        }
        if latitude.abs() > 90.0 {
            return Err(AstroError::math_error(
                "latlong_validation",
                MathErrorKind::OutOfRange,
                &format!("Latitude {} outside valid range [-90, 90] degrees", latitude),
            ));
        }
        if longitude.abs() > 180.0 {
            return Err(AstroError::math_error(
                "latlong_validation",
                MathErrorKind::OutOfRange,
                &format!(
                    "Longitude {} outside valid range [-180, 180] degrees",
                    longitude
                ),
            ));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude 0, longitude 0. The engine starts here until a location fix arrives.
    pub const fn null_island() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_radians(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl Default for LatLong {
    fn default() -> Self {
        Self::null_island()
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}
