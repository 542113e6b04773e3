//! Coordinate systems: a frame family plus an equinox.
//!
//! Equatorial and ecliptic frames are tied to an equinox and only B1950.0
//! (FK4) and J2000.0 (FK5) are supported for conversion. Galactic and
//! supergalactic frames are fixed on the sky; their equinox value is carried
//! along but never used.
//!
//! ```
//! use skypos::{CoordinateSystem, Family};
//!
//! let sys: CoordinateSystem = "ecl b1950".parse().unwrap();
//! assert_eq!(sys, CoordinateSystem::ECL_B1950);
//! assert_eq!(sys.family(), Family::Ecliptic);
//! assert_eq!(sys.to_string(), "EC_B1950");
//! ```

use crate::{CoordError, CoordResult};
use skypos_core::constants::{B1950_YEAR, J2000_YEAR};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Family {
    Equatorial,
    Ecliptic,
    Galactic,
    Supergalactic,
}

/// The frame a conversion actually runs in.
///
/// Every supported [`CoordinateSystem`] maps to exactly one code; systems
/// that map to none (for example equatorial at equinox 1975) cannot be
/// converted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConversionCode {
    EquatorialB1950,
    EquatorialJ2000,
    EclipticB1950,
    EclipticJ2000,
    Galactic,
    Supergalactic,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateSystem {
    family: Family,
    equinox: f64,
}

impl CoordinateSystem {
    pub const EQ_J2000: Self = Self::new(Family::Equatorial, J2000_YEAR);
    pub const EQ_B1950: Self = Self::new(Family::Equatorial, B1950_YEAR);
    pub const ECL_J2000: Self = Self::new(Family::Ecliptic, J2000_YEAR);
    pub const ECL_B1950: Self = Self::new(Family::Ecliptic, B1950_YEAR);
    pub const GALACTIC: Self = Self::new(Family::Galactic, J2000_YEAR);
    pub const SUPERGALACTIC: Self = Self::new(Family::Supergalactic, J2000_YEAR);

    /// Any equinox is accepted here; [`conversion_code`](Self::conversion_code)
    /// is where unsupported combinations are rejected.
    pub const fn new(family: Family, equinox: f64) -> Self {
        Self { family, equinox }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn equinox(&self) -> f64 {
        self.equinox
    }

    pub fn is_equatorial(&self) -> bool {
        self.family == Family::Equatorial
    }

    pub fn is_equatorial_j2000(&self) -> bool {
        self.is_equatorial() && self.equinox == J2000_YEAR
    }

    pub fn conversion_code(&self) -> CoordResult<ConversionCode> {
        let code = match (self.family, self.equinox) {
            (Family::Galactic, _) => ConversionCode::Galactic,
            (Family::Supergalactic, _) => ConversionCode::Supergalactic,
            (Family::Equatorial, e) if e == B1950_YEAR => ConversionCode::EquatorialB1950,
            (Family::Equatorial, e) if e == J2000_YEAR => ConversionCode::EquatorialJ2000,
            (Family::Ecliptic, e) if e == B1950_YEAR => ConversionCode::EclipticB1950,
            (Family::Ecliptic, e) if e == J2000_YEAR => ConversionCode::EclipticJ2000,
            _ => {
                return Err(CoordError::unsupported_system(format!(
                    "{} (only B1950 and J2000 equinoxes can be converted)",
                    self
                )))
            }
        };
        Ok(code)
    }

    pub fn is_supported(&self) -> bool {
        self.conversion_code().is_ok()
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.family {
            Family::Galactic => return write!(f, "GALACTIC"),
            Family::Supergalactic => return write!(f, "SUPERGALACTIC"),
            Family::Equatorial => "EQ",
            Family::Ecliptic => "EC",
        };
        if self.equinox == J2000_YEAR {
            write!(f, "{prefix}_J2000")
        } else if self.equinox == B1950_YEAR {
            write!(f, "{prefix}_B1950")
        } else {
            write!(f, "{prefix}_{:.1}", self.equinox)
        }
    }
}

const FAMILY_PREFIXES: [(&str, Family); 14] = [
    ("SUPERGALACTIC", Family::Supergalactic),
    ("SUPERGAL", Family::Supergalactic),
    ("SGAL", Family::Supergalactic),
    ("SG", Family::Supergalactic),
    ("GALACTIC", Family::Galactic),
    ("GAL", Family::Galactic),
    ("GA", Family::Galactic),
    ("G", Family::Galactic),
    ("EQUATORIAL", Family::Equatorial),
    ("EQU", Family::Equatorial),
    ("EQ", Family::Equatorial),
    ("ECLIPTIC", Family::Ecliptic),
    ("ECL", Family::Ecliptic),
    ("EC", Family::Ecliptic),
];

fn parse_equinox(text: &str) -> Option<f64> {
    match text {
        "" | "J" | "J2" | "J20" | "J200" | "J2000" | "2000" => Some(J2000_YEAR),
        "B" | "B1" | "B19" | "B195" | "B1950" | "1950" => Some(B1950_YEAR),
        _ => None,
    }
}

/// Parses names such as `EQ_J2000`, `equ b1950`, `J2000`, `ecl`, `gal`,
/// `SUPERGALACTIC`. Case, spaces, underscores and dashes are ignored; a bare
/// equinox means equatorial and a bare family means J2000.
impl FromStr for CoordinateSystem {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_uppercase)
            .collect();
        if key.is_empty() {
            return Err(CoordError::unsupported_system("empty coordinate system name"));
        }

        let (family, rest) = FAMILY_PREFIXES
            .iter()
            .find(|(prefix, _)| key.starts_with(prefix))
            .map(|(prefix, family)| (*family, &key[prefix.len()..]))
            .unwrap_or((Family::Equatorial, key.as_str()));

        match family {
            Family::Galactic | Family::Supergalactic if rest.is_empty() => {
                Ok(Self::new(family, J2000_YEAR))
            }
            Family::Equatorial | Family::Ecliptic => parse_equinox(rest)
                .map(|equinox| Self::new(family, equinox))
                .ok_or_else(|| CoordError::unsupported_system(s.trim().to_string())),
            _ => Err(CoordError::unsupported_system(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_systems_parse() {
        let cases = [
            ("EQ_J2000", CoordinateSystem::EQ_J2000),
            ("eq_b1950", CoordinateSystem::EQ_B1950),
            ("equ j2000", CoordinateSystem::EQ_J2000),
            ("Equatorial B1950", CoordinateSystem::EQ_B1950),
            ("J2000", CoordinateSystem::EQ_J2000),
            ("b", CoordinateSystem::EQ_B1950),
            ("EQJ2000", CoordinateSystem::EQ_J2000),
            ("ECB1950", CoordinateSystem::ECL_B1950),
            ("ecliptic", CoordinateSystem::ECL_J2000),
            ("EC_J2000", CoordinateSystem::ECL_J2000),
            ("gal", CoordinateSystem::GALACTIC),
            ("G", CoordinateSystem::GALACTIC),
            ("GALACTIC", CoordinateSystem::GALACTIC),
            ("sgal", CoordinateSystem::SUPERGALACTIC),
            ("SuperGalactic", CoordinateSystem::SUPERGALACTIC),
        ];
        for (text, expected) in cases {
            let parsed: CoordinateSystem = text.parse().unwrap();
            assert_eq!(parsed, expected, "{text}");
        }
    }

    #[test]
    fn test_unknown_names_rejected() {
        for text in ["", "  ", "fk6", "eq_j1975", "gal b1950", "horizon"] {
            let result: CoordResult<CoordinateSystem> = text.parse();
            assert!(
                matches!(result, Err(CoordError::UnsupportedCoordinateSystem { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for sys in [
            CoordinateSystem::EQ_J2000,
            CoordinateSystem::EQ_B1950,
            CoordinateSystem::ECL_J2000,
            CoordinateSystem::ECL_B1950,
            CoordinateSystem::GALACTIC,
            CoordinateSystem::SUPERGALACTIC,
        ] {
            let parsed: CoordinateSystem = sys.to_string().parse().unwrap();
            assert_eq!(parsed, sys);
        }
    }

    #[test]
    fn test_conversion_codes() {
        assert_eq!(
            CoordinateSystem::EQ_B1950.conversion_code().unwrap(),
            ConversionCode::EquatorialB1950
        );
        assert_eq!(
            CoordinateSystem::new(Family::Galactic, 1983.5)
                .conversion_code()
                .unwrap(),
            ConversionCode::Galactic
        );
        let odd = CoordinateSystem::new(Family::Equatorial, 1975.0);
        assert!(!odd.is_supported());
        assert_eq!(odd.to_string(), "EQ_1975.0");
    }

    #[test]
    fn test_equatorial_flags() {
        assert!(CoordinateSystem::EQ_B1950.is_equatorial());
        assert!(!CoordinateSystem::EQ_B1950.is_equatorial_j2000());
        assert!(CoordinateSystem::EQ_J2000.is_equatorial_j2000());
        assert!(!CoordinateSystem::GALACTIC.is_equatorial());
    }
}
