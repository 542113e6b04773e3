//! Sexagesimal formatting for sky coordinates.
//!
//! Three styles are produced, selected by what the value represents:
//!
//! | Value | Style | Example (precision 5) |
//! |-------|-------|-----------------------|
//! | equatorial longitude (RA) | hours-minutes-seconds | `12h34m56.78s` |
//! | equatorial latitude (Dec) | degrees-minutes-seconds | `+12d34m56.7s` |
//! | anything else | decimal degrees | `123.45679d` |
//!
//! # Precision
//!
//! A single `precision` number (0 through [`MAX_PRECISION`]) controls how much
//! of the sexagesimal value is shown. For HMS, precision 0-1 stops at minutes,
//! 2-3 at whole seconds, and from 4 up adds `precision - 3` decimal places to
//! the seconds. For DMS, precision 0 shows only degrees, 1-2 stops at
//! arcminutes, 3-4 at whole arcseconds, and from 5 up adds `precision - 4`
//! decimals. Decimal style simply prints `precision` decimals.
//!
//! Rounding carries upward through every field, so 59.96 seconds shown with one
//! decimal becomes the next minute rather than `60.0`.
//!
//! # Re-entrancy
//!
//! [`SexagesimalFormat`] is a plain `Copy` value. Build one wherever you need
//! it; there is no shared formatter.
//!
//! ```
//! use skypos_core::angle::SexagesimalFormat;
//!
//! let fmt = SexagesimalFormat::default();
//! assert_eq!(fmt.format(188.73658333, false, true), "12h34m56.78s");
//! assert_eq!(fmt.format(12.58241667, true, true), "+12d34m56.7s");
//! assert_eq!(fmt.format(-12.58241667, true, true), "-12d34m56.7s");
//! assert_eq!(fmt.format(123.456789, false, false), "123.45679d");
//! ```

use crate::constants::DEG_PER_HOUR;

/// Precision used when the caller does not choose one.
pub const DEFAULT_PRECISION: u8 = 5;

/// Largest precision honoured; larger requests are clamped to it.
pub const MAX_PRECISION: u8 = 8;

/// Which notation a value is written in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SexagesimalStyle {
    Hms,
    Dms,
    Decimal,
}

impl SexagesimalStyle {
    /// Equatorial coordinates use HMS for longitude and DMS for latitude;
    /// every other frame uses decimal degrees.
    pub fn for_axis(is_latitude: bool, is_equatorial: bool) -> Self {
        match (is_equatorial, is_latitude) {
            (true, false) => Self::Hms,
            (true, true) => Self::Dms,
            (false, _) => Self::Decimal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SexagesimalFormat {
    precision: u8,
}

impl Default for SexagesimalFormat {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SexagesimalFormat {
    pub fn new(precision: u8) -> Self {
        Self {
            precision: precision.min(MAX_PRECISION),
        }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Formats `value` (decimal degrees) for the given axis.
    ///
    /// Longitudes are wrapped into [0, 360) first. Latitudes always carry an
    /// explicit sign.
    pub fn format(&self, value: f64, is_latitude: bool, is_equatorial: bool) -> String {
        let mut value = value;
        let negative = is_latitude && value < 0.0;
        if !is_latitude && value < 0.0 {
            value = value % 360.0 + 360.0;
        }
        if !is_latitude && value >= 360.0 {
            value %= 360.0;
        }

        let sign = match (is_latitude, negative) {
            (false, _) => "",
            (true, false) => "+",
            (true, true) => "-",
        };

        let p = self.precision as i32;
        match SexagesimalStyle::for_axis(is_latitude, is_equatorial) {
            SexagesimalStyle::Decimal => {
                // A longitude that rounds up to 360 is shown as 0.
                let scale = 10_f64.powi(p);
                if !is_latitude && libm::round(value * scale) / scale >= 360.0 {
                    value = 0.0;
                }
                let sign = if is_latitude && value >= 0.0 { "+" } else { "" };
                format!("{sign}{value:.*}d", self.precision as usize)
            }
            SexagesimalStyle::Dms => {
                let fields = match p {
                    0 => 1,
                    1 | 2 => 2,
                    3 | 4 => 3,
                    _ => p - 1,
                };
                Fields::split(value.abs()).render(sign, 'd', 360, fields, p - 4)
            }
            SexagesimalStyle::Hms => {
                let fields = match p {
                    0 | 1 => 2,
                    2 | 3 => 3,
                    _ => p,
                };
                Fields::split(value.abs() / DEG_PER_HOUR).render(sign, 'h', 24, fields, p - 3)
            }
        }
    }
}

/// A non-negative value split into whole units, minutes, seconds and the
/// leftover fraction of a second.
#[derive(Clone, Copy)]
struct Fields {
    whole: i64,
    minutes: i64,
    seconds: i64,
    fraction: f64,
}

impl Fields {
    fn split(value: f64) -> Self {
        let whole = libm::trunc(value);
        let rem = (value - whole) * 60.0;
        let minutes = libm::trunc(rem);
        let rem = (rem - minutes) * 60.0;
        let seconds = libm::trunc(rem);
        Self {
            whole: whole as i64,
            minutes: minutes as i64,
            seconds: seconds as i64,
            fraction: rem - seconds,
        }
    }

    /// `fields` is how many groups to show (1 = units only, 2 = up to minutes,
    /// 3 = up to seconds, 4+ = seconds with `frac_digits` decimals).
    fn render(&self, sign: &str, unit: char, circle: i64, fields: i32, frac_digits: i32) -> String {
        let Fields {
            mut whole,
            mut minutes,
            mut seconds,
            fraction,
        } = *self;

        match fields {
            1 => {
                if minutes >= 30 {
                    whole += 1;
                }
                format!("{sign}{:02}{unit}", whole % circle)
            }
            2 => {
                if seconds >= 30 {
                    minutes += 1;
                }
                carry(&mut minutes, &mut whole);
                format!("{sign}{}{unit}{minutes:02}m", whole % circle)
            }
            3 => {
                if fraction >= 0.5 {
                    seconds += 1;
                }
                carry(&mut seconds, &mut minutes);
                carry(&mut minutes, &mut whole);
                format!("{sign}{}{unit}{minutes:02}m{seconds:02}s", whole % circle)
            }
            _ => {
                let digits = frac_digits.max(1) as usize;
                let scale = 10_i64.pow(digits as u32);
                let mut frac = libm::round(fraction * scale as f64) as i64;
                if frac >= scale {
                    frac -= scale;
                    seconds += 1;
                }
                carry(&mut seconds, &mut minutes);
                carry(&mut minutes, &mut whole);
                format!(
                    "{sign}{}{unit}{minutes:02}m{seconds:02}.{frac:0digits$}s",
                    whole % circle
                )
            }
        }
    }
}

#[inline]
fn carry(low: &mut i64, high: &mut i64) {
    if *low >= 60 {
        *low -= 60;
        *high += 1;
    }
}
