//! Error types for the geometry layer.
//!
//! Almost everything in this crate is infallible: vectors and matrices are plain
//! fixed-size values. The exceptions are `Vector3::try_normalize` and the
//! construction of observer coordinates, which reject non-finite or out-of-range
//! input instead of letting NaN leak into the pointing pipeline.
//!
//! ```
//! use celestial_core::{AstroError, LatLong, MathErrorKind};
//!
//! let err = LatLong::new(91.0, 0.0).unwrap_err();
//! assert!(matches!(
//!     err,
//!     AstroError::MathError { kind: MathErrorKind::OutOfRange, .. }
//! ));
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Input is NaN or infinity.
    NotFinite,
    /// Value outside valid domain (e.g., latitude > 90°).
    OutOfRange,
    /// A direction was requested from a vector with no length.
    DegenerateVector,
}

/// Unified error type for the geometry layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    /// Numerical input or computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Algorithm or calculation failure.
    #[error("Calculation error in {context}: {message}")]
    CalculationError { context: String, message: String },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    /// Creates a [`CalculationError`](Self::CalculationError).
    pub fn calculation_error(context: &str, reason: &str) -> Self {
        Self::CalculationError {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns the [`MathErrorKind`] for math errors, `None` otherwise.
    pub fn math_kind(&self) -> Option<&MathErrorKind> {
        match self {
            Self::MathError { kind, .. } => Some(kind),
            Self::CalculationError { .. } => None,
        }
    }
}
