//! Conversion of positions between coordinate systems.
//!
//! [`convert`] picks one of three paths:
//!
//! - **same system**: the position is returned, except that an equatorial
//!   J2000 position with proper motion observed at an epoch other than 2000.0
//!   is brought to 2000.0 (see [`crate::epoch::correct_epoch`]);
//! - **B1950 ⇄ J2000 equatorial with proper motion**: the full FK4 ⇄ FK5
//!   transform, with the converted proper motion attached to the result;
//! - **anything else**: rotation into the source's base frame, an FK4 ⇄ FK5
//!   step if the bases differ, and rotation out of the target's base frame.
//!   Proper motion is dropped; a J2000 equatorial result carries a zero one.
//!
//! The result epoch is 2000.0 when the target equinox is 2000 and 1950.0
//! otherwise.

pub mod fk4;
pub mod frames;

use crate::{ConversionCode, CoordResult, CoordinateSystem, Position, ProperMotion};
use fk4::CatalogEntry;
use frames::BaseFrame;
use skypos_core::constants::{ARCSEC_TO_RAD, B1950_YEAR, J2000_YEAR};
use skypos_core::Vector3;

/// Converts `position` into `target`.
///
/// Fails with [`CoordError::UnsupportedCoordinateSystem`](crate::CoordError)
/// when either system has no conversion code.
pub fn convert(position: &Position, target: CoordinateSystem) -> CoordResult<Position> {
    let from = position.system().conversion_code()?;
    let to = target.conversion_code()?;

    if position.system() == target {
        if target.is_equatorial_j2000()
            && position.epoch() != J2000_YEAR
            && position.proper_motion().is_some()
        {
            log::debug!("{}: epoch correction from {}", target, position.epoch());
            return Ok(crate::epoch::correct_epoch(position));
        }
        log::debug!("{}: identity", target);
        return Ok(*position);
    }

    let epoch = result_epoch(target);

    if position.has_proper_motion() {
        match (from, to) {
            (ConversionCode::EquatorialB1950, ConversionCode::EquatorialJ2000) => {
                log::debug!("{} -> {}: FK4 to FK5 with proper motion", position.system(), target);
                let entry = fk4::fk4_to_fk5(&catalog_entry(position));
                return from_catalog_entry(&entry, target, epoch);
            }
            (ConversionCode::EquatorialJ2000, ConversionCode::EquatorialB1950) => {
                log::debug!("{} -> {}: FK5 to FK4 with proper motion", position.system(), target);
                let entry = fk4::fk5_to_fk4(&catalog_entry(position));
                return from_catalog_entry(&entry, target, epoch);
            }
            _ => {}
        }
    }

    log::debug!("{} -> {}: frame rotation", position.system(), target);
    let (lon, lat) = rotate(from, to, position.lon().radians(), position.lat().radians());
    let proper_motion = target.is_equatorial_j2000().then_some(ProperMotion::ZERO);

    Ok(Position::from_radians_normalized(
        lon,
        lat,
        target,
        proper_motion,
        epoch,
    ))
}

/// Converts `(lon, lat)` in radians between the frames of two conversion
/// codes, treating the object as fixed.
pub fn rotate(from: ConversionCode, to: ConversionCode, lon: f64, lat: f64) -> (f64, f64) {
    if from == to {
        return (lon, lat);
    }

    let (from_base, into_base) = frames::to_base(from);
    let (to_base, into_target_base) = frames::to_base(to);

    let v = into_base * Vector3::from_spherical(lon, lat);
    let v = match (from_base, to_base) {
        (BaseFrame::Fk4B1950, BaseFrame::Fk5J2000) => {
            let (ra, dec) = frames::lon_lat(&v);
            let (ra, dec) = fk4::fk4_to_fk5_fixed(ra, dec);
            Vector3::from_spherical(ra, dec)
        }
        (BaseFrame::Fk5J2000, BaseFrame::Fk4B1950) => {
            let (ra, dec) = frames::lon_lat(&v);
            let (ra, dec) = fk4::fk5_to_fk4_fixed(ra, dec);
            Vector3::from_spherical(ra, dec)
        }
        _ => v,
    };

    frames::lon_lat(&(into_target_base.transpose() * v))
}

fn result_epoch(target: CoordinateSystem) -> f64 {
    if target.equinox() == J2000_YEAR {
        J2000_YEAR
    } else {
        B1950_YEAR
    }
}

fn catalog_entry(position: &Position) -> CatalogEntry {
    let pm = position.proper_motion().unwrap_or_default();
    let dec = position.lat().radians();
    let cos_dec = libm::cos(dec);
    let ra_rate = if cos_dec.abs() > 1e-12 {
        pm.lon_rate() * ARCSEC_TO_RAD / cos_dec
    } else {
        0.0
    };

    CatalogEntry {
        ra: position.lon().radians(),
        dec,
        ra_rate,
        dec_rate: pm.lat_rate() * ARCSEC_TO_RAD,
    }
}

fn from_catalog_entry(
    entry: &CatalogEntry,
    target: CoordinateSystem,
    epoch: f64,
) -> CoordResult<Position> {
    let lon_rate = entry.ra_rate / ARCSEC_TO_RAD * libm::cos(entry.dec);
    let lat_rate = entry.dec_rate / ARCSEC_TO_RAD;
    let proper_motion = ProperMotion::new(lon_rate, lat_rate)?;

    Ok(Position::from_radians_normalized(
        entry.ra,
        entry.dec,
        target,
        Some(proper_motion),
        epoch,
    ))
}

/// A converter bound to a target system.
///
/// Handy when many positions go to the same place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateConverter {
    target: CoordinateSystem,
}

impl CoordinateConverter {
    pub fn new(target: CoordinateSystem) -> CoordResult<Self> {
        target.conversion_code()?;
        Ok(Self { target })
    }

    pub fn target(&self) -> CoordinateSystem {
        self.target
    }

    pub fn convert(&self, position: &Position) -> CoordResult<Position> {
        convert(position, self.target)
    }

    pub fn convert_all(&self, positions: &[Position]) -> CoordResult<Vec<Position>> {
        positions.iter().map(|p| self.convert(p)).collect()
    }
}
