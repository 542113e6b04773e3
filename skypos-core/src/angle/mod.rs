//! Angles and everything needed to read and write them.
//!
//! - [`Angle`]: a radian-backed value with degree/hour/arcsecond views
//! - [`normalize`]: wrapping and clamping into conventional ranges
//! - [`validate`]: range checks returning [`AstroError`](crate::AstroError)
//! - [`format`] / [`parse`]: sexagesimal strings in both directions
//!
//! Nothing in this module holds shared state; formatters are plain values
//! built per call and the parser only reads compiled regexes.

mod core;
pub mod format;
pub mod normalize;
pub mod parse;
#[cfg(feature = "serde")]
mod serde_;
pub mod validate;

pub use self::core::Angle;
pub use format::{SexagesimalFormat, SexagesimalStyle, DEFAULT_PRECISION, MAX_PRECISION};
pub use normalize::{clamp_dec, wrap_0_2pi, wrap_0_360};
pub use parse::{parse_sexagesimal, SexagesimalUnit};
pub use validate::{validate_latitude, validate_longitude};
