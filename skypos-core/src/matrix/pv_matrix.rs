use super::Vector3;

/// A 6x6 matrix acting on a position-velocity pair.
///
/// Rows 0-2 produce the new position and rows 3-5 the new velocity; columns
/// are laid out the same way on the input side. Catalogue-to-catalogue
/// transforms such as FK4→FK5 are published in this form because the
/// velocity feeds back into the position and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvMatrix6 {
    rows: [[f64; 6]; 6],
}

impl PvMatrix6 {
    pub const fn from_rows(rows: [[f64; 6]; 6]) -> Self {
        Self { rows }
    }

    /// Multiplies `(position, velocity)` by the matrix.
    pub fn apply(&self, position: Vector3, velocity: Vector3) -> (Vector3, Vector3) {
        let input = [
            position.x, position.y, position.z, velocity.x, velocity.y, velocity.z,
        ];
        let mut out = [0.0; 6];
        for (cell, row) in out.iter_mut().zip(self.rows.iter()) {
            *cell = row.iter().zip(input.iter()).map(|(m, v)| m * v).sum();
        }
        (
            Vector3::new(out[0], out[1], out[2]),
            Vector3::new(out[3], out[4], out[5]),
        )
    }
}
