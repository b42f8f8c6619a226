//! 3D Cartesian vectors for frame-to-frame pointing math.
//!
//! Every direction the pointing engine handles is a `Vector3`: gravity and the
//! magnetic field in phone coordinates, the zenith and the celestial pole in the
//! star-fixed frame, and the resulting line of sight.
//!
//! # Building a local basis
//!
//! The engine repeatedly builds an orthonormal (North, Up, East) basis from two
//! measured directions. The recipe is always the same:
//!
//! 1. Normalize the "up" direction.
//! 2. Take the [`rejection`](Vector3::rejection) of the second direction from
//!    up (the part of it lying in the horizontal plane) and normalize it: North.
//! 3. East is `north.cross(&up)`.
//!
//! ```
//! use celestial_core::Vector3;
//!
//! let up = Vector3::new(0.0, 0.0, 2.0).normalize();
//! let north = Vector3::new(0.0, 1.0, 1.0).rejection(&up).normalize();
//! let east = north.cross(&up);
//!
//! assert_eq!(north, Vector3::y_axis());
//! assert_eq!(east, Vector3::x_axis());
//! ```
use crate::{AstroError, AstroResult, MathErrorKind};
use std::fmt;

/// A 3D Cartesian vector.
///
/// Components are public; the type is `Copy` and every operation returns a new
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// Unit vector along +Z. In the celestial frame this is the north celestial pole.
    #[inline]
    pub const fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.magnitude_squared())
    }

    /// Squared length. Sensor validation compares this against a tolerance
    /// directly, so no square root is taken.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector pointing in the same direction.
    ///
    /// The zero vector is returned unchanged rather than turning into NaN.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        }
    }

    /// Like [`normalize`](Self::normalize) but fails on a zero-length or
    /// non-finite vector.
    pub fn try_normalize(&self) -> AstroResult<Self> {
        let mag = self.magnitude();
        if !mag.is_finite() {
            return Err(AstroError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::NotFinite,
                &format!("cannot normalize {}", self),
            ));
        }
        if mag == 0.0 {
            return Err(AstroError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::DegenerateVector,
                "zero-length vector has no direction",
            ));
        }
        Ok(*self / mag)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product: `x_axis().cross(&y_axis()) == z_axis()`.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Component of `self` orthogonal to `direction`: `self - direction * (self · direction)`.
    ///
    /// `direction` is expected to be a unit vector; the result is not normalized.
    ///
    /// ```
    /// use celestial_core::Vector3;
    ///
    /// let v = Vector3::new(3.0, 0.0, 4.0);
    /// assert_eq!(v.rejection(&Vector3::z_axis()), Vector3::new(3.0, 0.0, 0.0));
    /// ```
    pub fn rejection(&self, direction: &Self) -> Self {
        *self - *direction * self.dot(direction)
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    pub fn angle_to(&self, other: &Self) -> f64 {
        libm::atan2(self.cross(other).magnitude(), self.dot(other))
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// True when all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        vec * self
    }
}

impl std::ops::Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// v[i] indexing (panics if i > 2)
impl std::ops::Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({:.9}, {:.9}, {:.9})", self.x, self.y, self.z)
    }
}
