//! 3x3 matrices for moving directions between the phone, local and celestial frames.
//!
//! The pointing engine works with three orthonormal frames and only ever needs
//! matrices whose rows (or columns) are the axes of one frame expressed in
//! another. Such a matrix is a rotation, so its inverse is its transpose.
//!
//! # Rows versus columns
//!
//! [`from_columns`](RotationMatrix3::from_columns) with the axes `(a, b, c)` of
//! frame F written in frame G gives the matrix taking F-coordinates to
//! G-coordinates. [`from_rows`](RotationMatrix3::from_rows) with the same three
//! vectors gives the transpose, i.e. the matrix going the other way, without
//! computing an inverse:
//!
//! ```
//! use celestial_core::{RotationMatrix3, Vector3};
//!
//! let a = Vector3::new(0.0, 1.0, 0.0);
//! let b = Vector3::new(0.0, 0.0, 1.0);
//! let c = Vector3::new(1.0, 0.0, 0.0);
//!
//! let to_g = RotationMatrix3::from_columns(a, b, c);
//! let to_f = RotationMatrix3::from_rows(a, b, c);
//!
//! assert_eq!(to_f, to_g.transpose());
//! assert_eq!(to_g * to_f, RotationMatrix3::identity());
//! ```
//!
//! # Storage Layout
//!
//! Elements are stored row-major as `[[f64; 3]; 3]`; `m[(i, j)]` is row `i`,
//! column `j`, and `m * v` is the usual column-vector product.

use super::Vector3;
use crate::constants::DEG_TO_RAD;
use std::fmt;

/// A 3x3 matrix, normally orthogonal with determinant +1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl Default for RotationMatrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl RotationMatrix3 {
    pub const fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a matrix from row-major elements. No orthogonality check is made.
    pub const fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    /// Builds the matrix whose rows are `r0`, `r1`, `r2`.
    pub fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Self::from_array([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Builds the matrix whose columns are `c0`, `c1`, `c2`.
    pub fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::from_array([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    /// Rotation by `degrees` about an arbitrary unit `axis`.
    ///
    /// A positive angle turns clockwise when looking down the axis from its tip
    /// toward the origin. With `axis` pointing to the zenith, a positive angle
    /// therefore swings North toward East, which is the sign convention of
    /// magnetic declination (positive = magnetic North east of true North).
    ///
    /// ```
    /// use celestial_core::{RotationMatrix3, Vector3};
    ///
    /// // Local frame: x = East, y = North, z = Up.
    /// let m = RotationMatrix3::rotation_about_axis(90.0, Vector3::z_axis());
    /// let turned = m * Vector3::y_axis();
    /// assert!((turned.x - 1.0).abs() < 1e-15);
    /// assert!(turned.y.abs() < 1e-15);
    /// ```
    pub fn rotation_about_axis(degrees: f64, axis: Vector3) -> Self {
        let (sin_d, cos_d) = libm::sincos(degrees * DEG_TO_RAD);
        let one_minus_cos = 1.0 - cos_d;

        let Vector3 { x, y, z } = axis;
        let (xs, ys, zs) = (x * sin_d, y * sin_d, z * sin_d);
        let (xm, ym, zm) = (x * one_minus_cos, y * one_minus_cos, z * one_minus_cos);
        let (xym, yzm, zxm) = (x * ym, y * zm, z * xm);

        Self::from_array([
            [x * xm + cos_d, xym + zs, zxm - ys],
            [xym - zs, y * ym + cos_d, yzm + xs],
            [zxm + ys, yzm - xs, z * zm + cos_d],
        ])
    }

    /// Returns the element at the specified row and column. Panics if either index is >= 3.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    /// Row `i` as a vector. Panics if `i >= 3`.
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::from_array(self.elements[i])
    }

    /// Column `j` as a vector. Panics if `j >= 3`.
    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(
            self.elements[0][j],
            self.elements[1][j],
            self.elements[2][j],
        )
    }

    /// Matrix product `self * other`: `other` acts first.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    pub fn apply(&self, v: Vector3) -> Vector3 {
        Vector3::new(self.row(0).dot(&v), self.row(1).dot(&v), self.row(2).dot(&v))
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Transpose; the inverse of an orthogonal matrix.
    pub fn transpose(&self) -> Self {
        Self::from_columns(self.row(0), self.row(1), self.row(2))
    }

    /// Checks `M * Mᵀ ≈ I` and `det(M) ≈ +1` within `tolerance`.
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        let product = self.multiply(&self.transpose());
        product.max_difference(&Self::identity()) <= tolerance
            && (self.determinant() - 1.0).abs() <= tolerance
    }

    /// Largest absolute element-wise difference between two matrices.
    pub fn max_difference(&self, other: &Self) -> f64 {
        let mut max_diff: f64 = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                max_diff = max_diff.max((self.elements[i][j] - other.elements[i][j]).abs());
            }
        }
        max_diff
    }
}

impl std::ops::Mul for RotationMatrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&RotationMatrix3> for &RotationMatrix3 {
    type Output = RotationMatrix3;

    fn mul(self, rhs: &RotationMatrix3) -> RotationMatrix3 {
        self.multiply(rhs)
    }
}

impl std::ops::Mul<Vector3> for RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply(vec)
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        self.apply(vec)
    }
}

impl std::ops::Index<(usize, usize)> for RotationMatrix3 {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.elements[row][col]
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix3:")?;
        for row in &self.elements {
            writeln!(f, "  [{:12.9} {:12.9} {:12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_vec_eq(a: Vector3, b: Vector3, eps: f64) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
        assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
        assert_abs_diff_eq!(a.z, b.z, epsilon = eps);
    }

    #[test]
    fn test_rows_and_columns_are_transposes() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        let c = Vector3::new(7.0, 8.0, 9.0);
        let rows = RotationMatrix3::from_rows(a, b, c);
        let cols = RotationMatrix3::from_columns(a, b, c);
        assert_eq!(rows.transpose(), cols);
        assert_eq!(rows.row(1), b);
        assert_eq!(cols.column(2), c);
        assert_eq!(rows[(0, 2)], 3.0);
        assert_eq!(cols.get(0, 2), 7.0);
    }

    #[test]
    fn test_orthonormal_rows_invert_columns() {
        let north = Vector3::new(0.0, 0.6, 0.8);
        let up = Vector3::new(0.0, -0.8, 0.6);
        let east = north.cross(&up);
        let m = RotationMatrix3::from_columns(north, up, east);
        let m_inv = RotationMatrix3::from_rows(north, up, east);
        assert!(m.is_rotation_matrix(1e-12));
        assert!((m * m_inv).max_difference(&RotationMatrix3::identity()) < 1e-12);
    }

    #[test]
    fn test_rotation_about_axis_zero_angle_is_identity() {
        let axis = Vector3::new(1.0, 2.0, -2.0).normalize();
        let m = RotationMatrix3::rotation_about_axis(0.0, axis);
        assert!(m.max_difference(&RotationMatrix3::identity()) < 1e-15);
    }

    #[test]
    fn test_rotation_about_axis_direction() {
        // North (y) turns toward East (x) for positive angles about Up (z).
        let m = RotationMatrix3::rotation_about_axis(30.0, Vector3::z_axis());
        let turned = m * Vector3::y_axis();
        assert_vec_eq(turned, Vector3::new(0.5, 0.75_f64.sqrt(), 0.0), 1e-15);

        let back = RotationMatrix3::rotation_about_axis(-30.0, Vector3::z_axis()) * turned;
        assert_vec_eq(back, Vector3::y_axis(), 1e-15);
    }

    #[test]
    fn test_rotation_about_axis_keeps_axis_fixed() {
        let axis = Vector3::new(0.3, -0.4, 0.5).normalize();
        let m = RotationMatrix3::rotation_about_axis(123.0, axis);
        assert!(m.is_rotation_matrix(1e-12));
        assert_vec_eq(m * axis, axis, 1e-12);
    }

    #[test]
    fn test_multiply_order() {
        let rz = RotationMatrix3::rotation_about_axis(90.0, Vector3::z_axis());
        let rx = RotationMatrix3::rotation_about_axis(90.0, Vector3::x_axis());
        // rx acts first: y -> -z under rx, then -z stays under rz.
        let v = (rz * rx) * Vector3::y_axis();
        assert_vec_eq(v, -Vector3::z_axis(), 1e-15);
        assert_eq!(&rz * &rx, rz * rx);
    }

    #[test]
    fn test_is_rotation_matrix_rejects_reflection() {
        let m = RotationMatrix3::from_array([[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!m.is_rotation_matrix(1e-12));
        let skew = RotationMatrix3::from_array([[1.0, 0.1, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!skew.is_rotation_matrix(1e-12));
    }

    #[test]
    fn test_display() {
        let s = format!("{}", RotationMatrix3::identity());
        assert!(s.starts_with("RotationMatrix3:"));
        assert_eq!(s.lines().count(), 4);
    }
}
