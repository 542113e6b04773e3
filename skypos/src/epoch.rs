//! Linear proper-motion extrapolation.
//!
//! Proper motions are small and the intervals involved are decades at most,
//! so positions are moved along straight lines in (lon, lat):
//!
//! ```text
//! lon' = lon + lon_rate * years / (cos(lat) * 3600)
//! lat' = lat + lat_rate * years / 3600
//! ```
//!
//! The longitude rate already includes the cos(lat) factor, which is divided
//! back out. Within 1e-12 of a pole that division is skipped.

use crate::{Position, ProperMotion};
use chrono::{DateTime, Datelike, Utc};
use skypos_core::constants::{ARCSEC_PER_DEG, J2000_YEAR};
use skypos_core::angle::wrap_0_360;

const POLE_COS_LIMIT: f64 = 1e-12;

/// Moves `(lon_deg, lat_deg)` by `years` of `proper_motion`.
///
/// Returns degrees. Longitude is not normalized and latitude is not clamped.
pub fn apply_proper_motion(
    lon_deg: f64,
    lat_deg: f64,
    proper_motion: &ProperMotion,
    years: f64,
) -> (f64, f64) {
    let cos_lat = libm::cos(lat_deg.to_radians());
    let lon_step = proper_motion.lon_rate() * years;
    let lon = if cos_lat.abs() > POLE_COS_LIMIT {
        lon_deg + lon_step / (cos_lat * ARCSEC_PER_DEG)
    } else {
        lon_deg + lon_step / ARCSEC_PER_DEG
    };
    let lat = lat_deg + proper_motion.lat_rate() * years / ARCSEC_PER_DEG;
    (lon, lat)
}

/// Where `position` is at `years` after J2000.0, in degrees.
///
/// Without a proper motion the position is returned as is.
pub fn position_after(position: &Position, years: f64) -> (f64, f64) {
    let lon = position.lon().degrees();
    let lat = position.lat().degrees();
    match position.proper_motion() {
        Some(pm) if years != 0.0 => apply_proper_motion(lon, lat, &pm, years),
        _ => (lon, lat),
    }
}

/// Brings an equatorial J2000 position observed at another epoch to 2000.0.
///
/// Positions with no proper motion, or already at 2000.0, only have their
/// epoch set. The proper motion is carried through unchanged.
pub fn correct_epoch(position: &Position) -> Position {
    let years = J2000_YEAR - position.epoch();
    let (lon, lat) = match position.proper_motion() {
        Some(pm) if years != 0.0 => apply_proper_motion(
            position.lon().degrees(),
            position.lat().degrees(),
            &pm,
            years,
        ),
        _ => return position.with_epoch(J2000_YEAR),
    };

    log::debug!(
        "epoch correction {:.3} -> 2000.0 moved ({:.8}, {:.8}) to ({:.8}, {:.8})",
        position.epoch(),
        position.lon().degrees(),
        position.lat().degrees(),
        lon,
        lat
    );

    Position::from_radians_normalized(
        wrap_0_360(lon).to_radians(),
        lat.to_radians(),
        position.system(),
        position.proper_motion(),
        J2000_YEAR,
    )
}

/// Fractional years between J2000.0 and the UTC calendar day of `date`.
///
/// Counts whole years plus elapsed days over the length of that year (365 or
/// 366). The time of day is ignored.
pub fn years_from_j2000(date: &DateTime<Utc>) -> f64 {
    let day = date.date_naive();
    let days_in_year = if day.leap_year() { 366.0 } else { 365.0 };
    f64::from(day.year() - 2000) + f64::from(day.ordinal0()) / days_in_year
}
