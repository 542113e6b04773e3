//! 3x3 rotation matrices for sky-frame conversions.
//!
//! Every conversion between equatorial, ecliptic, galactic and supergalactic
//! coordinates, and the tangent-plane frame used for offsets, is a rotation of
//! the unit sphere. They compose by multiplication: to apply A then B, use
//! `B * A` (the rightmost matrix acts first).
//!
//! # Rotation Conventions (ERFA-Compatible)
//!
//! `rotate_x(phi)`, `rotate_y(theta)` and `rotate_z(psi)` pre-multiply the
//! matrix by a rotation of the *frame* about that axis (the "passive"
//! convention). A positive rotation of 90 degrees about Z takes the vector
//! `[1, 0, 0]` to `[0, -1, 0]`.
//!
//! A classic Euler-angle frame such as galactic coordinates is therefore:
//!
//! ```
//! use skypos_core::RotationMatrix3;
//!
//! let (psi, theta, phi) = (0.1_f64, 0.2_f64, 0.3_f64);
//! let mut m = RotationMatrix3::identity();
//! m.rotate_z(-psi);
//! m.rotate_x(-theta);
//! m.rotate_z(-phi);
//! assert!(m.is_rotation_matrix(1e-14));
//! ```
//!
//! The inverse of a rotation is its transpose.

use super::Vector3;

/// A 3x3 rotation matrix, row-major. All angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `elements[i][j]` is row `i`, column `j`. Not checked for orthogonality.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    pub fn rotate_x(&mut self, phi: f64) {
        let (s, c) = libm::sincos(phi);
        let e = &mut self.elements;
        for j in 0..3 {
            let (r1, r2) = (e[1][j], e[2][j]);
            e[1][j] = c * r1 + s * r2;
            e[2][j] = -s * r1 + c * r2;
        }
    }

    pub fn rotate_y(&mut self, theta: f64) {
        let (s, c) = libm::sincos(theta);
        let e = &mut self.elements;
        for j in 0..3 {
            let (r0, r2) = (e[0][j], e[2][j]);
            e[0][j] = c * r0 - s * r2;
            e[2][j] = s * r0 + c * r2;
        }
    }

    pub fn rotate_z(&mut self, psi: f64) {
        let (s, c) = libm::sincos(psi);
        let e = &mut self.elements;
        for j in 0..3 {
            let (r0, r1) = (e[0][j], e[1][j]);
            e[0][j] = c * r0 + s * r1;
            e[1][j] = -s * r0 + c * r1;
        }
    }

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

    pub fn transpose(&self) -> Self {
        let e = &self.elements;
        Self::from_array([
            [e[0][0], e[1][0], e[2][0]],
            [e[0][1], e[1][1], e[2][1]],
            [e[0][2], e[1][2], e[2][2]],
        ])
    }

    pub fn apply_to_vector(&self, v: [f64; 3]) -> [f64; 3] {
        let e = &self.elements;
        [
            e[0][0] * v[0] + e[0][1] * v[1] + e[0][2] * v[2],
            e[1][0] * v[0] + e[1][1] * v[1] + e[1][2] * v[2],
            e[2][0] * v[0] + e[2][1] * v[1] + e[2][2] * v[2],
        ]
    }

    /// True when the matrix is orthogonal with determinant +1 to within `tolerance`.
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        let m = &self.elements;
        let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        if (det - 1.0).abs() > tolerance {
            return false;
        }

        let product = self.multiply(&self.transpose());
        let identity = Self::identity();
        (0..3).all(|i| (0..3).all(|j| (product.get(i, j) - identity.get(i, j)).abs() <= tolerance))
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
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

impl std::ops::Mul<Vector3> for &RotationMatrix3 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        Vector3::from_array(self.apply_to_vector(vec.to_array()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HALF_PI;

    #[test]
    fn test_rotate_z() {
        // Rz(+90°): [1,0,0] -> [0,-1,0]
        let mut m = RotationMatrix3::identity();
        m.rotate_z(HALF_PI);
        let result = m.apply_to_vector([1.0, 0.0, 0.0]);
        assert!(result[0].abs() < 1e-15);
        assert!((result[1] + 1.0).abs() < 1e-15);
        assert!(result[2].abs() < 1e-15);
    }

    #[test]
    fn test_rotate_x() {
        // Rx(+90°): [0,1,0] -> [0,0,-1]
        let mut m = RotationMatrix3::identity();
        m.rotate_x(HALF_PI);
        let result = m.apply_to_vector([0.0, 1.0, 0.0]);
        assert!(result[0].abs() < 1e-15);
        assert!(result[1].abs() < 1e-15);
        assert!((result[2] + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_rotate_y() {
        // Ry(+90°): [0,0,1] -> [-1,0,0]
        let mut m = RotationMatrix3::identity();
        m.rotate_y(HALF_PI);
        let result = m.apply_to_vector([0.0, 0.0, 1.0]);
        assert!((result[0] + 1.0).abs() < 1e-15);
        assert!(result[1].abs() < 1e-15);
        assert!(result[2].abs() < 1e-15);
    }

    #[test]
    fn test_rotations_compose_in_call_order() {
        let mut stepwise = RotationMatrix3::identity();
        stepwise.rotate_z(0.4);
        stepwise.rotate_x(-0.7);

        let mut z = RotationMatrix3::identity();
        z.rotate_z(0.4);
        let mut x = RotationMatrix3::identity();
        x.rotate_x(-0.7);

        let composed = x * z;
        for i in 0..3 {
            for j in 0..3 {
                assert!((composed.get(i, j) - stepwise.get(i, j)).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_transpose_inverts() {
        let mut m = RotationMatrix3::identity();
        m.rotate_z(0.5);
        m.rotate_y(-0.2);
        let product = &m * &m.transpose();
        assert!((product.get(0, 0) - 1.0).abs() < 1e-15);
        assert!(product.get(0, 1).abs() < 1e-15);
        assert!(product.is_rotation_matrix(1e-14));
    }

    #[test]
    fn test_is_rotation_matrix_rejects_scaling() {
        let m = RotationMatrix3::from_array([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!m.is_rotation_matrix(1e-15));
    }

    #[test]
    fn test_mul_vector() {
        let m = RotationMatrix3::identity();
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m * v, v);
        assert_eq!(&m * v, v);
    }
}
