//! Sexagesimal text for positions.
//!
//! Thin wrappers over [`skypos_core::angle`] that pick hours or degrees from a
//! [`CoordinateSystem`] and report failures as
//! [`CoordError::InvalidSexagesimalFormat`](crate::CoordError).
//!
//! ```
//! use skypos::sexagesimal::{parse_sexagesimal, to_sexagesimal};
//!
//! assert_eq!(to_sexagesimal(187.5, false, true, 4), "12h30m00.0s");
//! let ra = parse_sexagesimal("12h30m00.0s", false, true).unwrap();
//! assert!((ra - 187.5).abs() < 1e-9);
//! ```

use crate::{CoordResult, CoordinateSystem, Position};
use skypos_core::angle::{self, SexagesimalFormat};

/// Formats `value` (degrees) with `precision`; see [`SexagesimalFormat`].
pub fn to_sexagesimal(value: f64, is_latitude: bool, is_equatorial: bool, precision: u8) -> String {
    SexagesimalFormat::new(precision).format(value, is_latitude, is_equatorial)
}

/// Parses sexagesimal or decimal text into degrees.
pub fn parse_sexagesimal(text: &str, is_latitude: bool, is_equatorial: bool) -> CoordResult<f64> {
    Ok(angle::parse_sexagesimal(text, is_latitude, is_equatorial)?)
}

pub fn parse_longitude(text: &str, system: CoordinateSystem) -> CoordResult<f64> {
    parse_sexagesimal(text, false, system.is_equatorial())
}

pub fn parse_latitude(text: &str, system: CoordinateSystem) -> CoordResult<f64> {
    parse_sexagesimal(text, true, system.is_equatorial())
}

/// Longitude and latitude of `position` as text, in its own system's style.
pub fn format_position(position: &Position, format: &SexagesimalFormat) -> (String, String) {
    let equatorial = position.system().is_equatorial();
    (
        format.format(position.lon().degrees(), false, equatorial),
        format.format(position.lat().degrees(), true, equatorial),
    )
}
