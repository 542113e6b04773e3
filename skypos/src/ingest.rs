//! Turning user text into positions.
//!
//! Two entry points:
//!
//! - [`parse_position`] reads a single free-form position such as
//!   `"10.68 41.27"`, `"00h42m44.3s, +41d16m09s equ b1950"`,
//!   `"0042443+411608"` or `"120.5 -3.2 gal"`. Text that does not start like
//!   a number is handed back as an object name; resolving names is left to
//!   the caller.
//! - [`parse_target_list`] reads a fixed-target list: optional header lines
//!   (`COORD_SYSTEM = equatorial`, `EQUINOX = B1950`, `NAME-RESOLVER = NED`)
//!   followed by one row per target, `name ra dec [pm_lon pm_lat [epoch]]`
//!   or `name ra dec epoch`. Bad rows are collected rather than aborting
//!   the parse.
//!
//! In both, a plain decimal number is read as degrees; sexagesimal text
//! follows [`skypos_core::angle::parse_sexagesimal`].

use crate::sexagesimal::{parse_latitude, parse_longitude};
use crate::target::Target;
use crate::{
    CoordError, CoordResult, CoordinateSystem, Family, Position, PositionJ2000, ProperMotion,
};
use once_cell::sync::Lazy;
use regex::Regex;
use skypos_core::constants::{B1950_YEAR, J2000_YEAR};
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row errors collected before [`parse_target_list`] gives up.
pub const MAX_ERRORS: usize = 20;

/// Rows below this length are ignored.
const MIN_ROW_LEN: usize = 2;

/// Fields read from a row; anything past this is ignored.
const MAX_ROW_FIELDS: usize = 8;

/// A fourth field above this is an epoch rather than a proper motion.
const EPOCH_THRESHOLD: f64 = 1899.0;

static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z_-]*)\s*=\s*(.*?)\s*$")
        .expect("header pattern is a valid regex")
});

/// What [`parse_position`] found.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParsedTarget {
    Position(PositionJ2000),
    /// An object name to be resolved elsewhere.
    Name(String),
}

fn is_number(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        && token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Plain numbers are degrees; everything else goes to the sexagesimal parser.
fn as_angle_text(text: &str) -> String {
    if is_number(text) {
        format!("{text}d")
    } else {
        text.to_string()
    }
}

/// Splits compact digits into space-separated fields of two, with a decimal
/// point after the second digit of the last field: `0042443` → `00 42 44.3`.
/// A leading sign stays with the first field.
fn expand_compact(digits: &str) -> String {
    let (sign, body) = match digits.chars().next() {
        Some(c @ ('+' | '-')) => (c.to_string(), &digits[1..]),
        _ => (String::new(), digits),
    };
    let split_at = |s: &str, n: usize| -> (String, String) {
        let n = n.min(s.len());
        (s[..n].to_string(), s[n..].to_string())
    };

    let (first, rest) = split_at(body, 2);
    let (second, rest) = split_at(&rest, 2);
    let third = if rest.len() > 2 {
        format!("{}.{}", &rest[..2], &rest[2..])
    } else {
        rest
    };

    let or_zero = |s: String| if s.is_empty() { "0".to_string() } else { s };
    format!("{sign}{} {} {}", or_zero(first), or_zero(second), third)
        .trim()
        .to_string()
}

/// `0042443+411608` and `0042443-411608` style positions.
fn split_compact(token: &str) -> Option<(String, String)> {
    let (ra, dec) = if let Some(at) = token.find('+').filter(|&i| i > 0) {
        (&token[..at], token[at + 1..].to_string())
    } else if let Some(at) = token.find('-').filter(|&i| i > 0) {
        (&token[..at], format!("-{}", &token[at + 1..]))
    } else {
        return None;
    };

    let ra = if is_number(ra) {
        expand_compact(ra)
    } else {
        ra.to_string()
    };
    let dec = if is_number(&dec) {
        expand_compact(&dec)
    } else {
        dec
    };
    Some((ra, dec))
}

struct Pieces {
    lon: String,
    lat: String,
    system: String,
}

fn split_comma(text: &str) -> Pieces {
    let (lon, rest) = text.split_once(',').unwrap_or((text, ""));
    let (numbers, words): (Vec<&str>, Vec<&str>) = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .partition(|t| is_number(t));

    if !numbers.is_empty() {
        return Pieces {
            lon: lon.trim().to_string(),
            lat: numbers.join(" "),
            system: words.join(" "),
        };
    }
    let mut words = words.into_iter();
    Pieces {
        lon: lon.trim().to_string(),
        lat: words.next().unwrap_or_default().to_string(),
        system: words.collect::<Vec<_>>().join(" "),
    }
}

fn split_whitespace(text: &str) -> Pieces {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let numbers: Vec<&str> = tokens.iter().copied().filter(|t| is_number(t)).collect();

    match numbers.len() {
        0 => {
            let mut words = tokens.iter().copied();
            let first = words.next().unwrap_or_default();
            let (lon, mut lat) =
                split_compact(first).unwrap_or_else(|| (first.to_string(), String::new()));
            let mut system = Vec::new();
            for word in words {
                if lat.is_empty() {
                    lat = word.to_string();
                } else {
                    system.push(word);
                }
            }
            Pieces {
                lon,
                lat,
                system: system.join(" "),
            }
        }
        1 => {
            let lon = tokens.first().copied().unwrap_or_default();
            let lat = tokens.get(1).copied().unwrap_or_default();
            Pieces {
                lon: lon.to_string(),
                lat: lat.to_string(),
                system: tokens.iter().skip(2).copied().collect::<Vec<_>>().join(" "),
            }
        }
        n => {
            let half = n.div_ceil(2);
            let (lon, lat) = if n == 2 {
                (numbers[0].to_string(), numbers[1].to_string())
            } else {
                (numbers[..half].join(" "), numbers[half..].join(" "))
            };
            let words: Vec<&str> = tokens.iter().copied().filter(|t| !is_number(t)).collect();
            Pieces {
                lon,
                lat,
                system: words.join(" "),
            }
        }
    }
}

/// True when `text` should be read as a position rather than a name.
fn looks_like_position(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if text.len() < 2 || !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
        return false;
    }

    let (sign, body) = match first {
        '+' | '-' => (&text[..1], &text[1..]),
        _ => ("", text),
    };
    let head = body
        .split(|c: char| matches!(c, '+' | '-' | ',') || c.is_whitespace())
        .next()
        .unwrap_or_default();
    let head = format!("{sign}{head}");

    is_number(&head) || parse_longitude(&head, CoordinateSystem::EQ_J2000).is_ok()
}

/// Parses one free-form position or object name.
///
/// Positions are returned in J2000 with their original system remembered.
pub fn parse_position(text: &str) -> CoordResult<ParsedTarget> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(CoordError::parsing_error("empty position"));
    }

    if !looks_like_position(&text) {
        if text.len() < 2 {
            return Err(CoordError::parsing_error(format!(
                "'{text}' is too short to be an object name"
            )));
        }
        return Ok(ParsedTarget::Name(text));
    }

    let pieces = if text.contains(',') {
        split_comma(&text)
    } else {
        split_whitespace(&text)
    };
    if pieces.lat.is_empty() {
        return Err(CoordError::parsing_error(format!(
            "'{text}' has a longitude but no latitude"
        )));
    }

    let system = if pieces.system.trim().is_empty() {
        CoordinateSystem::EQ_J2000
    } else {
        pieces.system.parse()?
    };

    let lon = parse_longitude(&as_angle_text(&pieces.lon), system)?;
    let lat = parse_latitude(&as_angle_text(&pieces.lat), system)?;
    let position = Position::from_degrees(lon, lat, system)?;

    Ok(ParsedTarget::Position(position.to_j2000()?))
}

/// Which service an unresolved name should be looked up in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resolver {
    Ned,
    #[default]
    Simbad,
}

impl Resolver {
    fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "ned" => Some(Self::Ned),
            "simbad" => Some(Self::Simbad),
            _ => None,
        }
    }
}

/// One row of a target list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListedTarget {
    pub line: usize,
    pub name: String,
    /// `None` when the row named the target without coordinates.
    pub position: Option<PositionJ2000>,
    pub resolver: Resolver,
}

impl ListedTarget {
    /// The fixed target for this row, if it has coordinates.
    pub fn to_target(&self) -> Option<Target> {
        self.position.map(|p| Target::FixedSingle(p.into()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Every problem found in a target list, up to [`MAX_ERRORS`].
#[derive(Debug, Error, Clone, PartialEq)]
#[error("target list has {} error(s){}", .errors.len(), render_errors(.errors))]
pub struct TargetListError {
    pub errors: Vec<RowError>,
    /// Set when parsing stopped at [`MAX_ERRORS`].
    pub truncated: bool,
}

fn render_errors(errors: &[RowError]) -> String {
    errors.iter().map(|e| format!("\n  {e}")).collect()
}

impl From<TargetListError> for CoordError {
    fn from(error: TargetListError) -> Self {
        CoordError::parsing_error(error.to_string())
    }
}

/// Strips `#` and `!` comments; lines starting with `\` are dropped whole.
fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    if line.starts_with('\\') {
        return "";
    }
    match line.find(['#', '!']) {
        Some(at) => line[..at].trim(),
        None => line,
    }
}

/// Splits a row into whitespace-separated fields, keeping double-quoted
/// names together.
fn row_fields(row: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut rest = row.trim_start();

    while !rest.is_empty() && fields.len() < MAX_ROW_FIELDS {
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted
                .find('"')
                .ok_or_else(|| format!("unterminated quote in: {row}"))?;
            let after = &quoted[end + 1..];
            if !after.is_empty() && !after.starts_with(char::is_whitespace) {
                return Err(format!("text after closing quote in: {row}"));
            }
            fields.push(quoted[..end].split_whitespace().collect::<Vec<_>>().join(" "));
            rest = after.trim_start();
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            if token.contains('"') {
                return Err(format!("misplaced quote in: {row}"));
            }
            fields.push(token.to_string());
            rest = rest[end..].trim_start();
        }
    }
    Ok(fields)
}

/// `key=value` fields are attributes, not data.
fn data_field(field: Option<&String>) -> Option<&str> {
    field
        .map(String::as_str)
        .filter(|f| !f.find('=').is_some_and(|at| at > 0))
}

struct ListHeader {
    family: Family,
    equinox: f64,
    resolver: Resolver,
}

impl Default for ListHeader {
    fn default() -> Self {
        Self {
            family: Family::Equatorial,
            equinox: J2000_YEAR,
            resolver: Resolver::default(),
        }
    }
}

impl ListHeader {
    /// Applies a header line; `Ok(false)` when `key` is not a header keyword.
    fn apply(&mut self, key: &str, value: &str) -> Result<bool, String> {
        match key.to_ascii_uppercase().as_str() {
            "COORD_SYSTEM" => {
                self.family = match value.to_ascii_lowercase().as_str() {
                    "equatorial" => Family::Equatorial,
                    "ecliptic" => Family::Ecliptic,
                    "galactic" => Family::Galactic,
                    "supergalactic" => Family::Supergalactic,
                    _ => {
                        return Err(format!(
                            "COORD_SYSTEM must be equatorial, ecliptic, galactic or \
                             supergalactic, got '{value}'"
                        ))
                    }
                };
            }
            "EQUINOX" => {
                self.equinox = match value.to_ascii_uppercase().as_str() {
                    "J2000" => J2000_YEAR,
                    "B1950" => B1950_YEAR,
                    _ => return Err(format!("EQUINOX must be J2000 or B1950, got '{value}'")),
                };
            }
            "NAME-RESOLVER" => {
                self.resolver = Resolver::parse(value).ok_or_else(|| {
                    format!("NAME-RESOLVER must be NED or Simbad, got '{value}'")
                })?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn system(&self) -> CoordinateSystem {
        match self.family {
            Family::Galactic => CoordinateSystem::GALACTIC,
            Family::Supergalactic => CoordinateSystem::SUPERGALACTIC,
            family => CoordinateSystem::new(family, self.equinox),
        }
    }
}

fn parse_number(field: &str, what: &str) -> Result<f64, String> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{what} '{field}' is not a number"))
}

fn parse_row(fields: &[String], line: usize, header: &ListHeader) -> Result<ListedTarget, String> {
    let name = data_field(fields.first())
        .ok_or_else(|| "missing target name".to_string())?
        .to_string();

    let (Some(lon), Some(lat)) = (data_field(fields.get(1)), data_field(fields.get(2))) else {
        let resolver = match data_field(fields.get(1)) {
            Some(text) => Resolver::parse(text)
                .ok_or_else(|| format!("unknown name resolver '{text}'"))?,
            None => header.resolver,
        };
        return Ok(ListedTarget {
            line,
            name,
            position: None,
            resolver,
        });
    };

    let mut epoch = J2000_YEAR;
    let mut proper_motion = None;
    if let Some(fourth) = data_field(fields.get(3)) {
        match fourth.parse::<f64>() {
            Ok(value) if value > EPOCH_THRESHOLD => epoch = value,
            _ => {
                if let Some(fifth) = data_field(fields.get(4)) {
                    let lon_rate = parse_number(fourth, "proper motion")?;
                    let lat_rate = parse_number(fifth, "proper motion")?;
                    proper_motion =
                        Some(ProperMotion::new(lon_rate, lat_rate).map_err(|e| e.to_string())?);
                }
                if let Some(sixth) = data_field(fields.get(5)) {
                    epoch = parse_number(sixth, "epoch")?;
                }
            }
        }
    }

    let system = header.system();
    let to_message = |e: CoordError| e.to_string();
    let lon = parse_longitude(&as_angle_text(lon), system).map_err(to_message)?;
    let lat = parse_latitude(&as_angle_text(lat), system).map_err(to_message)?;

    let mut position = Position::from_degrees(lon, lat, system)
        .map_err(to_message)?
        .with_epoch(epoch);
    if let Some(pm) = proper_motion {
        position = position.with_proper_motion(pm);
    }

    Ok(ListedTarget {
        line,
        name,
        position: Some(position.to_j2000().map_err(to_message)?),
        resolver: header.resolver,
    })
}

/// Parses a fixed-target list.
///
/// Header lines may appear anywhere and apply to the rows after them. Line
/// numbers in results and errors start at 1.
pub fn parse_target_list(text: &str) -> Result<Vec<ListedTarget>, TargetListError> {
    let mut header = ListHeader::default();
    let mut targets = Vec::new();
    let mut errors = Vec::new();
    let mut truncated = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let row = strip_comment(raw);
        if row.len() < MIN_ROW_LEN {
            log::trace!("line {line}: skipped");
            continue;
        }

        let header_error = match HEADER_REGEX.captures(row) {
            Some(caps) => match header.apply(&caps[1], &caps[2]) {
                Ok(true) => {
                    log::trace!("line {line}: header {}", &caps[1]);
                    continue;
                }
                Ok(false) => None,
                Err(message) => Some(message),
            },
            None => None,
        };

        let parsed = match header_error {
            Some(message) => Err(message),
            None => row_fields(row).and_then(|fields| parse_row(&fields, line, &header)),
        };
        match parsed {
            Ok(target) => targets.push(target),
            Err(message) => errors.push(RowError { line, message }),
        }

        if errors.len() >= MAX_ERRORS {
            truncated = true;
            break;
        }
    }

    if errors.is_empty() {
        Ok(targets)
    } else {
        Err(TargetListError { errors, truncated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(text: &str) -> PositionJ2000 {
        match parse_position(text).unwrap() {
            ParsedTarget::Position(p) => p,
            other => panic!("{text}: {other:?}"),
        }
    }

    #[test]
    fn test_decimal_pair() {
        let p = position("10.68 41.27");
        assert!((p.ra().degrees() - 10.68).abs() < 1e-9);
        assert!((p.dec().degrees() - 41.27).abs() < 1e-9);
        assert_eq!(p.original().system(), CoordinateSystem::EQ_J2000);
    }

    #[test]
    fn test_comma_separated_sexagesimal() {
        let p = position("00h42m44.3s, +41d16m09s");
        assert!((p.ra().degrees() - (42.0 / 60.0 + 44.3 / 3600.0) * 15.0).abs() < 1e-9);
        assert!((p.dec().degrees() - (41.0 + 16.0 / 60.0 + 9.0 / 3600.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spaced_sexagesimal_splits_in_half() {
        let p = position("12 30 00 -45 30 00");
        assert!((p.ra().degrees() - 187.5).abs() < 1e-9);
        assert!((p.dec().degrees() + 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_compact_form() {
        let p = position("0042443+411608");
        assert!((p.ra().degrees() - (42.0 / 60.0 + 44.3 / 3600.0) * 15.0).abs() < 1e-9);
        assert!((p.dec().degrees() - (41.0 + 16.0 / 60.0 + 8.0 / 3600.0)).abs() < 1e-9);

        let p = position("1234567-123456");
        assert!(p.dec().degrees() < 0.0);
    }

    #[test]
    fn test_trailing_system() {
        let p = position("0.0 0.0 equ b1950");
        assert_eq!(p.original().system(), CoordinateSystem::EQ_B1950);
        assert!((p.ra().degrees() - 0.640_691).abs() < 1e-6);

        let p = position("120.5, -3.2 gal");
        assert_eq!(p.original().system(), CoordinateSystem::GALACTIC);
    }

    #[test]
    fn test_names() {
        assert_eq!(
            parse_position("  M31  ").unwrap(),
            ParsedTarget::Name("M31".to_string())
        );
        assert_eq!(
            parse_position("NGC   224").unwrap(),
            ParsedTarget::Name("NGC 224".to_string())
        );
        assert!(parse_position("").is_err());
        assert!(parse_position("x").is_err());
    }

    #[test]
    fn test_bad_positions() {
        assert!(parse_position("10.5").is_err());
        assert!(matches!(
            parse_position("10.5 20.5 fk6"),
            Err(CoordError::UnsupportedCoordinateSystem { .. })
        ));
        assert!(matches!(
            parse_position("10.5 95.0"),
            Err(CoordError::InvalidSexagesimalFormat { .. })
        ));
    }

    #[test]
    fn test_expand_compact() {
        assert_eq!(expand_compact("0042443"), "00 42 44.3");
        assert_eq!(expand_compact("+411608"), "+41 16 08");
        assert_eq!(expand_compact("12"), "12 0");
    }

    #[test]
    fn test_row_fields() {
        let fields = row_fields(r#""Crab Nebula" 05h34m31.9s +22d00m52s"#).unwrap();
        assert_eq!(fields, vec!["Crab Nebula", "05h34m31.9s", "+22d00m52s"]);
        assert!(row_fields(r#""open 1 2"#).is_err());
        assert!(row_fields(r#"na"me 1 2"#).is_err());
    }

    const LIST: &str = "\
\\ fixed targets
COORD_SYSTEM = equatorial
EQUINOX = J2000
NAME-RESOLVER = NED

m31   00h42m44.3s  +41d16m09s       # Andromeda
\"Barnard's Star\" 269.452 4.693 -0.798 10.328 2015.5
pm_only  10.0 20.0 0.1 0.2
epoch_only 10.0 20.0 1991.25
M87
M101 simbad
";

    #[test]
    fn test_target_list() {
        let targets = parse_target_list(LIST).unwrap();
        assert_eq!(targets.len(), 6);

        assert_eq!(targets[0].name, "m31");
        assert_eq!(targets[0].line, 6);
        assert_eq!(targets[0].resolver, Resolver::Ned);

        let barnard = targets[1].position.unwrap();
        assert_eq!(targets[1].name, "Barnard's Star");
        assert_eq!(barnard.original().epoch(), 2015.5);
        assert!(barnard.proper_motion().is_some());

        let pm_only = targets[2].position.unwrap();
        assert_eq!(pm_only.original().epoch(), 2000.0);
        assert_eq!(pm_only.proper_motion(), Some(ProperMotion::new(0.1, 0.2).unwrap()));

        let epoch_only = targets[3].position.unwrap();
        assert_eq!(epoch_only.original().epoch(), 1991.25);
        assert!(epoch_only.proper_motion().is_none());

        assert!(targets[4].position.is_none());
        assert_eq!(targets[4].resolver, Resolver::Ned);
        assert_eq!(targets[5].resolver, Resolver::Simbad);
        assert!(targets[4].to_target().is_none());
        assert!(targets[0].to_target().unwrap().is_fixed());
    }

    #[test]
    fn test_target_list_b1950_header() {
        let targets = parse_target_list("EQUINOX=B1950\norigin 0.0 0.0\n").unwrap();
        let p = targets[0].position.unwrap();
        assert_eq!(p.original().system(), CoordinateSystem::EQ_B1950);
        assert!((p.ra().degrees() - 0.640_691).abs() < 1e-6);
    }

    #[test]
    fn test_target_list_collects_errors() {
        let text = "COORD_SYSTEM = horizon\ngood 1.0 2.0\nbad 1.0 99.0\nworse 1.0 2.0 x y\n";
        let err = parse_target_list(text).unwrap_err();
        let lines: Vec<usize> = err.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert!(!err.truncated);
        assert!(err.to_string().starts_with("target list has 3 error(s)"));
    }

    #[test]
    fn test_target_list_stops_at_max_errors() {
        let text = "bad 1.0 99.0\n".repeat(MAX_ERRORS + 5);
        let err = parse_target_list(&text).unwrap_err();
        assert_eq!(err.errors.len(), MAX_ERRORS);
        assert!(err.truncated);
    }

    #[test]
    fn test_bad_header_lines_count_toward_max_errors() {
        let text = "EQUINOX = B1900\n".repeat(MAX_ERRORS + 10);
        let err = parse_target_list(&text).unwrap_err();
        assert_eq!(err.errors.len(), MAX_ERRORS);
        assert!(err.truncated);
        assert_eq!(err.errors.last().map(|e| e.line), Some(MAX_ERRORS));
    }
}
