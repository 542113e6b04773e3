//! Numeric foundation for sky-position work.
//!
//! This crate knows nothing about coordinate systems. It supplies the pieces the
//! `skypos` crate builds on:
//!
//! - [`Angle`] with validation, normalization and arithmetic
//! - [`RotationMatrix3`] and [`Vector3`] for frame rotations
//! - a stateless sexagesimal formatter and parser ([`angle::SexagesimalFormat`],
//!   [`angle::parse_sexagesimal`])
//! - [`AstroError`], the error type shared by everything above

pub mod angle;
pub mod constants;
pub mod errors;
pub mod math;
pub mod matrix;
pub mod obliquity;

pub use angle::Angle;
pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use matrix::{PvMatrix6, RotationMatrix3, Vector3};
