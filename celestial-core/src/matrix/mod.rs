//! Vectors and matrices for frame transformations.
//!
//! - [`RotationMatrix3`]: 3×3 matrix built from frame axes
//! - [`Vector3`]: 3D Cartesian vector

mod rotation_matrix;
mod vector3;

pub use rotation_matrix::RotationMatrix3;
pub use vector3::Vector3;
