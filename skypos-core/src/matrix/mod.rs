//! Cartesian machinery for frame conversions.
//!
//! Spherical coordinates are turned into unit [`Vector3`]s, rotated with a
//! [`RotationMatrix3`], and turned back. The FK4↔FK5 transform also carries a
//! velocity alongside the position, which is what [`PvMatrix6`] is for.

mod pv_matrix;
mod rotation_matrix;
mod vector3;

pub use pv_matrix::PvMatrix6;
pub use rotation_matrix::RotationMatrix3;
pub use vector3::Vector3;
