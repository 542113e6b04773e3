use crate::{geometry, Position, PositionJ2000};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An east/north displacement in arcseconds, measured in the tangent frame of
/// `anchor`.
///
/// Two offsets are equal when their deltas are equal; the anchor is ignored.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    delta_lon: f64,
    delta_lat: f64,
    anchor: Position,
}

impl Offset {
    pub fn new(delta_lon: f64, delta_lat: f64, anchor: Position) -> Self {
        Self {
            delta_lon,
            delta_lat,
            anchor,
        }
    }

    /// The offset of `to` as seen from `from`.
    pub fn between(from: &Position, to: &Position) -> Self {
        geometry::offset_of(from, to)
    }

    pub fn delta_lon(&self) -> f64 {
        self.delta_lon
    }

    pub fn delta_lat(&self) -> f64 {
        self.delta_lat
    }

    pub fn anchor(&self) -> &Position {
        &self.anchor
    }

    /// The position this offset points at from its anchor.
    pub fn resolve(&self) -> PositionJ2000 {
        geometry::position_at(&self.anchor, self)
    }
}

impl PartialEq for Offset {
    fn eq(&self, other: &Self) -> bool {
        self.delta_lon == other.delta_lon && self.delta_lat == other.delta_lat
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Δlon={:.3}″ Δlat={:.3}″", self.delta_lon, self.delta_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinateSystem;

    #[test]
    fn test_equality_ignores_anchor() {
        let a = Position::from_degrees(10.0, 10.0, CoordinateSystem::EQ_J2000).unwrap();
        let b = Position::from_degrees(200.0, -40.0, CoordinateSystem::GALACTIC).unwrap();
        assert_eq!(Offset::new(1.5, -2.0, a), Offset::new(1.5, -2.0, b));
        assert_ne!(Offset::new(1.5, -2.0, a), Offset::new(1.5, 2.0, a));
    }

    #[test]
    fn test_resolve_returns_target() {
        let from = Position::from_degrees(30.0, 10.0, CoordinateSystem::EQ_J2000).unwrap();
        let to = Position::from_degrees(30.2, 10.1, CoordinateSystem::EQ_J2000).unwrap();
        let there = Offset::between(&from, &to).resolve();
        assert!((there.ra().degrees() - 30.2).abs() < 1e-9);
        assert!((there.dec().degrees() - 10.1).abs() < 1e-9);
    }
}
