//! Raw orientation readings and the phone-frame axes they imply.
//!
//! A phone reports its orientation in one of two ways:
//!
//! - an accelerometer plus a magnetometer ([`SensorSample::TwoVector`]), from
//!   which Up and magnetic North are reconstructed geometrically, or
//! - a fused rotation vector ([`SensorSample::RotationVector`]), a unit
//!   quaternion `(x, y, z, w)` that already encodes the full attitude.
//!
//! Either way the result is the local magnetic North, Up and East directions
//! written in phone coordinates.

use celestial_core::{RotationMatrix3, Vector3};

/// Rotation-vector contents used before any rotation-vector reading arrives.
pub const DEFAULT_ROTATION_VECTOR: [f64; 4] = [1.0, 0.0, 0.0, 0.0];

/// The most recent accepted sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    /// Accelerometer and magnetometer readings in phone coordinates.
    TwoVector {
        acceleration: Vector3,
        magnetic_field: Vector3,
    },
    /// Android-convention rotation vector `[x, y, z, w]`.
    RotationVector([f64; 4]),
}

impl Default for SensorSample {
    /// An upright phone: Up along phone −y and magnetic North along −z, so
    /// the standard view looks toward magnetic North.
    fn default() -> Self {
        Self::TwoVector {
            acceleration: Vector3::new(0.0, -1.0, 0.0),
            magnetic_field: Vector3::new(0.0, 0.0, -1.0),
        }
    }
}

/// Magnetic North, Up and East in phone coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhoneAxes {
    pub north: Vector3,
    pub up: Vector3,
    pub east: Vector3,
}

impl PhoneAxes {
    /// The matrix taking phone coordinates into the (North, Up, East) frame.
    ///
    /// The axes form an orthonormal basis, so writing them as rows yields the
    /// inverse of the column matrix directly.
    pub fn inverse_matrix(&self) -> RotationMatrix3 {
        RotationMatrix3::from_rows(self.north, self.up, self.east)
    }
}

impl SensorSample {
    pub fn is_rotation_vector(&self) -> bool {
        matches!(self, Self::RotationVector(_))
    }

    /// Derives the local axes in phone coordinates from this reading.
    pub fn phone_axes(&self) -> PhoneAxes {
        match self {
            Self::RotationVector(rv) => {
                let m = rotation_matrix_from_vector(rv);
                PhoneAxes {
                    north: m.row(1),
                    up: m.row(2),
                    east: m.row(0),
                }
            }
            Self::TwoVector {
                acceleration,
                magnetic_field,
            } => {
                let up = acceleration.normalize();
                let north = magnetic_field.normalize().rejection(&up).normalize();
                let east = north.cross(&up);
                PhoneAxes { north, up, east }
            }
        }
    }
}

/// Rotation matrix for an Android rotation vector `[x, y, z, w]`.
///
/// Mirrors `SensorManager.getRotationMatrixFromVector` for a four-element
/// input: the vector is read as the unit quaternion `w + xi + yj + zk` and the
/// matrix maps device coordinates to world coordinates (x East, y North,
/// z Up). No normalization is applied.
///
/// ```
/// use celestial_pointing::sensor::rotation_matrix_from_vector;
/// use celestial_core::RotationMatrix3;
///
/// assert_eq!(
///     rotation_matrix_from_vector(&[0.0, 0.0, 0.0, 1.0]),
///     RotationMatrix3::identity()
/// );
/// ```
pub fn rotation_matrix_from_vector(rv: &[f64; 4]) -> RotationMatrix3 {
    let [q1, q2, q3, q0] = *rv;

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    RotationMatrix3::from_array([
        [1.0 - sq_q2 - sq_q3, q1_q2 - q3_q0, q1_q3 + q2_q0],
        [q1_q2 + q3_q0, 1.0 - sq_q1 - sq_q3, q2_q3 - q1_q0],
        [q1_q3 - q2_q0, q2_q3 + q1_q0, 1.0 - sq_q1 - sq_q2],
    ])
}
