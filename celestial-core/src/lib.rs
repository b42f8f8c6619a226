//! Geometry building blocks for device pointing.
//!
//! `celestial-core` supplies the small linear-algebra and sky-coordinate layer the
//! pointing engine is built on: vectors, rotation matrices assembled from frame
//! axes, validated observer positions, and the RA/Dec ↔ unit-vector mapping.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matrix`] | [`Vector3`] and [`RotationMatrix3`] |
//! | [`location`] | [`LatLong`] observer position |
//! | [`radec`] | [`RaDec`] and [`geocentric_coords`] |
//! | [`constants`] | Epochs, unit conversions, sidereal rates |
//! | [`errors`] | [`AstroError`] and [`AstroResult`] |
//!
//! # Re-exports
//!
//! ```
//! use celestial_core::{LatLong, RaDec, RotationMatrix3, Vector3};
//! use celestial_core::{AstroError, AstroResult, MathErrorKind};
//! ```
//!
//! # Design Notes
//!
//! - **Degrees at the edges**: locations, RA/Dec and rotation angles are taken
//!   in degrees because that is what location services, sensors and users
//!   supply. Trigonometry converts internally.
//!
//! - **Value types**: everything here is `Copy`; no function holds state.

pub mod constants;
pub mod errors;
pub mod location;
pub mod matrix;
pub mod radec;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use location::LatLong;
pub use matrix::{RotationMatrix3, Vector3};
pub use radec::{geocentric_coords, RaDec};
