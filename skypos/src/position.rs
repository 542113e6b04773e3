//! Sky positions.
//!
//! A [`Position`] is an immutable (lon, lat) pair tied to a
//! [`CoordinateSystem`] and an epoch, optionally with a [`ProperMotion`].
//! Longitude is normalized into [0°, 360°) on construction and latitude must
//! lie in [-90°, +90°].
//!
//! [`PositionJ2000`] is the canonical form the rest of the crate works in:
//! equatorial J2000 at epoch 2000.0. It also remembers the position the caller
//! originally supplied so that it can be shown back in the user's own system.

use crate::convert;
use crate::{CoordResult, CoordinateSystem, ProperMotion};
use skypos_core::angle::{clamp_dec, wrap_0_2pi};
use skypos_core::constants::J2000_YEAR;
use skypos_core::{Angle, Vector3};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Epoch given to a position when the caller does not supply one.
pub const DEFAULT_EPOCH: f64 = J2000_YEAR;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    lon: Angle,
    lat: Angle,
    proper_motion: Option<ProperMotion>,
    system: CoordinateSystem,
    epoch: f64,
}

impl Position {
    pub fn new(lon: Angle, lat: Angle, system: CoordinateSystem) -> CoordResult<Self> {
        let lon = lon.validate_longitude(true)?;
        let lat = lat.validate_latitude()?;

        Ok(Self {
            lon,
            lat,
            proper_motion: None,
            system,
            epoch: DEFAULT_EPOCH,
        })
    }

    pub fn from_degrees(lon_deg: f64, lat_deg: f64, system: CoordinateSystem) -> CoordResult<Self> {
        Self::new(
            Angle::from_degrees(lon_deg),
            Angle::from_degrees(lat_deg),
            system,
        )
    }

    /// Builds a position from values computed inside the crate.
    ///
    /// The inputs come from `atan2`/`asin` and are finite by construction; they
    /// are wrapped and clamped rather than validated.
    pub(crate) fn from_radians_normalized(
        lon_rad: f64,
        lat_rad: f64,
        system: CoordinateSystem,
        proper_motion: Option<ProperMotion>,
        epoch: f64,
    ) -> Self {
        Self {
            lon: Angle::from_radians(wrap_0_2pi(lon_rad)),
            lat: Angle::from_radians(clamp_dec(lat_rad)),
            proper_motion,
            system,
            epoch,
        }
    }

    pub fn with_proper_motion(self, proper_motion: ProperMotion) -> Self {
        Self {
            proper_motion: Some(proper_motion),
            ..self
        }
    }

    pub fn without_proper_motion(self) -> Self {
        Self {
            proper_motion: None,
            ..self
        }
    }

    pub fn with_epoch(self, epoch: f64) -> Self {
        Self { epoch, ..self }
    }

    pub fn lon(&self) -> Angle {
        self.lon
    }

    pub fn lat(&self) -> Angle {
        self.lat
    }

    pub fn proper_motion(&self) -> Option<ProperMotion> {
        self.proper_motion
    }

    /// True when a non-zero proper motion is attached.
    pub fn has_proper_motion(&self) -> bool {
        self.proper_motion.is_some_and(|pm| !pm.is_zero())
    }

    pub fn system(&self) -> CoordinateSystem {
        self.system
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    pub fn unit_vector(&self) -> Vector3 {
        Vector3::from_spherical(self.lon.radians(), self.lat.radians())
    }

    /// Converts into another coordinate system. See [`convert::convert`].
    pub fn convert_to(&self, target: CoordinateSystem) -> CoordResult<Position> {
        convert::convert(self, target)
    }

    pub fn to_j2000(&self) -> CoordResult<PositionJ2000> {
        PositionJ2000::from_position(*self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(lon={:.6}°, lat={:.6}°, epoch={:.1})",
            self.system,
            self.lon.degrees(),
            self.lat.degrees(),
            self.epoch
        )
    }
}

/// An equatorial J2000 position at epoch 2000.0, plus the position it was
/// derived from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionJ2000 {
    position: Position,
    original: Position,
}

impl PositionJ2000 {
    /// Converts any position to J2000, remembering `original` as given.
    pub fn from_position(original: Position) -> CoordResult<Self> {
        let position = convert::convert(&original, CoordinateSystem::EQ_J2000)?;
        Ok(Self {
            position: position.with_epoch(J2000_YEAR),
            original,
        })
    }

    pub fn new(ra: Angle, dec: Angle) -> CoordResult<Self> {
        let position = Position::new(ra, dec, CoordinateSystem::EQ_J2000)?;
        Ok(Self::from_canonical(position))
    }

    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> CoordResult<Self> {
        Self::new(Angle::from_degrees(ra_deg), Angle::from_degrees(dec_deg))
    }

    pub fn from_degrees_with_proper_motion(
        ra_deg: f64,
        dec_deg: f64,
        proper_motion: ProperMotion,
    ) -> CoordResult<Self> {
        let position = Position::from_degrees(ra_deg, dec_deg, CoordinateSystem::EQ_J2000)?
            .with_proper_motion(proper_motion);
        Ok(Self::from_canonical(position))
    }

    /// Wraps a position already in J2000 at epoch 2000; the original is
    /// synthesized from it.
    pub(crate) fn from_canonical(position: Position) -> Self {
        Self {
            position,
            original: position,
        }
    }

    /// Replaces the remembered original position.
    pub fn with_original(self, original: Position) -> Self {
        Self { original, ..self }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn original(&self) -> &Position {
        &self.original
    }

    pub fn ra(&self) -> Angle {
        self.position.lon
    }

    pub fn dec(&self) -> Angle {
        self.position.lat
    }

    pub fn proper_motion(&self) -> Option<ProperMotion> {
        self.position.proper_motion
    }
}

impl AsRef<Position> for PositionJ2000 {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl From<PositionJ2000> for Position {
    fn from(p: PositionJ2000) -> Self {
        p.position
    }
}

impl fmt::Display for PositionJ2000 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "J2000(RA={:.6}°, Dec={:.6}°)",
            self.position.lon.degrees(),
            self.position.lat.degrees()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordError;

    #[test]
    fn test_longitude_is_normalized() {
        let p = Position::from_degrees(-30.0, 10.0, CoordinateSystem::GALACTIC).unwrap();
        assert!((p.lon().degrees() - 330.0).abs() < 1e-12);
        let p = Position::from_degrees(360.0, 10.0, CoordinateSystem::GALACTIC).unwrap();
        assert_eq!(p.lon().degrees(), 0.0);
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let result = Position::from_degrees(10.0, 90.5, CoordinateSystem::EQ_J2000);
        assert!(matches!(result, Err(CoordError::InvalidCoordinate { .. })));
        assert!(Position::from_degrees(f64::NAN, 0.0, CoordinateSystem::EQ_J2000).is_err());
    }

    #[test]
    fn test_builders_return_new_values() {
        let base = Position::from_degrees(10.0, 20.0, CoordinateSystem::EQ_J2000).unwrap();
        let moved = base
            .with_epoch(1991.25)
            .with_proper_motion(ProperMotion::new(1.0, 2.0).unwrap());
        assert_eq!(base.epoch(), DEFAULT_EPOCH);
        assert!(base.proper_motion().is_none());
        assert_eq!(moved.epoch(), 1991.25);
        assert!(moved.has_proper_motion());
        assert!(!moved.without_proper_motion().has_proper_motion());
    }

    #[test]
    fn test_zero_proper_motion_is_not_motion() {
        let p = Position::from_degrees(10.0, 20.0, CoordinateSystem::EQ_J2000)
            .unwrap()
            .with_proper_motion(ProperMotion::ZERO);
        assert!(!p.has_proper_motion());
    }

    #[test]
    fn test_position_j2000_synthesizes_original() {
        let p = PositionJ2000::from_degrees(150.0, -20.0).unwrap();
        assert_eq!(p.original(), p.position());
        assert_eq!(p.position().system(), CoordinateSystem::EQ_J2000);
        assert_eq!(p.position().epoch(), 2000.0);
    }

    #[test]
    fn test_position_j2000_remembers_original_system() {
        let gal = Position::from_degrees(0.0, 90.0, CoordinateSystem::GALACTIC).unwrap();
        let p = gal.to_j2000().unwrap();
        assert_eq!(p.original().system(), CoordinateSystem::GALACTIC);
        assert!((p.ra().degrees() - 192.859_48).abs() < 1e-4);
        assert!((p.dec().degrees() - 27.128_30).abs() < 1e-4);
    }

    #[test]
    fn test_display() {
        let p = Position::from_degrees(10.0, -5.5, CoordinateSystem::EQ_B1950).unwrap();
        assert_eq!(
            p.to_string(),
            "EQ_B1950(lon=10.000000°, lat=-5.500000°, epoch=2000.0)"
        );
    }
}
