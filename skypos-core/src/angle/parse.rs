//! Sexagesimal and decimal angle parsing.
//!
//! [`parse_sexagesimal`] reads up to three numeric fields, each optionally
//! followed by a separator that names its unit:
//!
//! ```text
//! hours:    12h34m56.7s   12h34m   12h
//! degrees:  +45d30m15s    45d30'15"   45d30'   45.5d
//! minutes:  30m  30'      (a leading minutes or seconds field scales the result)
//! neutral:  12:34:56.7    12 34 56.7   12.5
//! ```
//!
//! Neutral separators (`:` and whitespace) leave the unit to the axis: a
//! latitude is read in degrees, an equatorial longitude in hours, any other
//! longitude in degrees. Only the last field may carry a decimal point.
//!
//! Sexagesimal notation is accepted only for equatorial coordinates; galactic
//! and ecliptic values must be decimal (a bare number or one ending in `d`).
//!
//! ```
//! use skypos_core::angle::parse_sexagesimal;
//!
//! let ra = parse_sexagesimal("12h30m00s", false, true).unwrap();
//! assert!((ra - 187.5).abs() < 1e-10);
//!
//! let dec = parse_sexagesimal("-45:30:00", true, true).unwrap();
//! assert!((dec + 45.5).abs() < 1e-10);
//!
//! assert!(parse_sexagesimal("12h30m", true, true).is_err());
//! ```

use crate::constants::DEG_PER_HOUR;
use crate::{AstroError, AstroResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// The unit the leading field of a sexagesimal string is counted in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SexagesimalUnit {
    Hours,
    Degrees,
}

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9.]+").expect("number pattern is a valid regex"));

const MAX_FIELDS: usize = 3;

struct Field {
    value: f64,
    has_point: bool,
    separator: char,
}

/// Parses a sexagesimal or decimal string into decimal degrees.
///
/// Returns [`AstroError::InvalidSexagesimal`] carrying the original input when
/// the text is malformed or the value falls outside the axis range
/// ([-90, 90] for latitude, [0, 360) for longitude).
pub fn parse_sexagesimal(input: &str, is_latitude: bool, is_equatorial: bool) -> AstroResult<f64> {
    let fail = |reason: &str| AstroError::invalid_sexagesimal(input, reason);

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(fail("empty string"));
    }

    let (negative, body) = match trimmed.as_bytes()[0] {
        b'-' => (true, trimmed[1..].trim_start()),
        b'+' => (false, trimmed[1..].trim_start()),
        _ => (false, trimmed),
    };
    if body.is_empty() {
        return Err(fail("sign without a value"));
    }

    let mut fields: Vec<Field> = Vec::with_capacity(MAX_FIELDS);
    let mut rest = body;
    while !rest.is_empty() && fields.len() < MAX_FIELDS {
        let (field, remaining) = read_field(rest).map_err(fail)?;
        fields.push(field);
        rest = remaining;
    }
    if !rest.is_empty() {
        return Err(fail("too many fields"));
    }

    let last = fields.len() - 1;
    if fields[..last].iter().any(|f| f.has_point) {
        return Err(fail("only the last field may have a decimal point"));
    }

    let pattern: String = fields.iter().map(|f| f.separator).collect();
    let (unit, is_decimal) = match pattern.as_str() {
        "hms" | "hm " | "hm" | "h " | "h" => (Some(SexagesimalUnit::Hours), false),
        "dms" | "dm " | "d'\"" | "d' " | "dm" | "d " | "d'" => {
            (Some(SexagesimalUnit::Degrees), false)
        }
        "'\"" | "' " | "'" | "\"" => (Some(SexagesimalUnit::Degrees), false),
        "d" => (Some(SexagesimalUnit::Degrees), true),
        ":: " | "   " | "ms" | "m " | ": " | "  " | "m" | "s" => (None, false),
        " " => (None, !(is_equatorial && !is_latitude)),
        _ => return Err(fail("unrecognised separator sequence")),
    };

    let unit = unit.unwrap_or(if is_latitude || !is_equatorial {
        SexagesimalUnit::Degrees
    } else {
        SexagesimalUnit::Hours
    });

    if unit == SexagesimalUnit::Hours && is_latitude {
        return Err(fail("HMS notation not valid for latitude"));
    }
    if !is_equatorial && !is_decimal {
        return Err(fail("sexagesimal notation requires equatorial coordinates"));
    }
    if fields[1..].iter().any(|f| f.value >= 60.0) {
        return Err(fail("minutes and seconds must be below 60"));
    }

    let mut angle = 0.0;
    let mut scale = 1.0;
    for field in &fields {
        angle += field.value / scale;
        scale *= 60.0;
    }
    match fields[0].separator {
        'm' | '\'' => angle /= 60.0,
        's' | '"' => angle /= 3600.0,
        _ => {}
    }
    if negative {
        angle = -angle;
    }

    if is_latitude {
        if !(-90.0..=90.0).contains(&angle) {
            return Err(fail("latitude must be within [-90, 90]"));
        }
        return Ok(angle);
    }

    let full_circle = match unit {
        SexagesimalUnit::Hours => 24.0,
        SexagesimalUnit::Degrees => 360.0,
    };
    if angle >= full_circle {
        return Err(fail("longitude is too big"));
    }
    if angle < 0.0 {
        return Err(fail("longitude can not be negative"));
    }

    Ok(match unit {
        SexagesimalUnit::Hours => angle * DEG_PER_HOUR,
        SexagesimalUnit::Degrees => angle,
    })
}

/// Reads one number and the separator after it, returning what is left.
fn read_field(text: &str) -> Result<(Field, &str), &'static str> {
    let token = NUMBER_REGEX
        .find(text)
        .map(|m| m.as_str())
        .ok_or("expected a number")?;

    let points = token.matches('.').count();
    if points > 1 {
        return Err("more than one decimal point in a field");
    }
    if points == token.len() {
        return Err("expected a number");
    }
    let value: f64 = token.parse().map_err(|_| "expected a number")?;

    let after = &text[token.len()..];
    let trimmed = after.trim();
    let (separator, remaining) = match trimmed.chars().next() {
        None => (' ', ""),
        Some(c) => match c {
            'h' | 'H' => ('h', trimmed[1..].trim()),
            'd' | 'D' => ('d', trimmed[1..].trim()),
            'm' | 'M' => ('m', trimmed[1..].trim()),
            's' | 'S' => ('s', trimmed[1..].trim()),
            ':' | '\'' | '"' => (c, trimmed[1..].trim()),
            _ if after.starts_with(char::is_whitespace) => (' ', trimmed),
            _ => return Err("unexpected character after number"),
        },
    };

    Ok((
        Field {
            value,
            has_point: points == 1,
            separator,
        },
        remaining,
    ))
}
