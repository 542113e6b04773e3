//! Spherical geometry on sky positions.
//!
//! Offsets are measured in the tangent frame of a reference position: rotate
//! the sky about the pole by -lon₁, then tilt by -lat₁, so the reference lands
//! on the x-axis with east along +y and north along +z. [`offset_of`] reads
//! angles off the rotated vector and [`position_at`] undoes the rotation.
//!
//! Distances use the spherical law of cosines with the cosine clamped to
//! [-1, 1]. Angles at the public surface are degrees, except offsets, which
//! are arcseconds.

use crate::epoch::position_after;
use crate::{CoordResult, CoordinateSystem, Offset, Position, PositionJ2000};
use chrono::{DateTime, Utc};
use skypos_core::angle::wrap_0_360;
use skypos_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, J2000_YEAR, RAD_TO_DEG};
use skypos_core::math::{acos_clamped, asin_clamped, law_of_cosines_separation};
use skypos_core::{RotationMatrix3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Separations below this (radians) have no meaningful position angle.
const COLOCATED_RAD: f64 = 4e-7;

/// Rotation taking equatorial vectors into the tangent frame at (lon, lat).
fn tangent_frame(lon_rad: f64, lat_rad: f64) -> RotationMatrix3 {
    let mut m = RotationMatrix3::identity();
    m.rotate_z(lon_rad);
    m.rotate_y(-lat_rad);
    m
}

/// Offset of `pos2` from `pos1`, both taken at J2000.0.
pub fn offset_of(pos1: &Position, pos2: &Position) -> Offset {
    offset_of_years(pos1, pos2, 0.0)
}

/// Offset of `pos2` from `pos1` after moving both by their proper motions
/// for `years_from_2000` years.
///
/// Longitudes and latitudes are used as given; convert both positions to the
/// same system first.
pub fn offset_of_years(pos1: &Position, pos2: &Position, years_from_2000: f64) -> Offset {
    let (lon1, lat1) = position_after(pos1, years_from_2000);
    let (lon2, lat2) = position_after(pos2, years_from_2000);

    let frame = tangent_frame(lon1 * DEG_TO_RAD, lat1 * DEG_TO_RAD);
    let v = frame * Vector3::from_spherical(lon2 * DEG_TO_RAD, lat2 * DEG_TO_RAD);

    let delta_east = libm::atan2(v.y, v.x);
    let delta_north = libm::atan2(v.z, v.xy_magnitude());

    Offset::new(
        delta_east / ARCSEC_TO_RAD,
        delta_north / ARCSEC_TO_RAD,
        *pos1,
    )
}

/// Offset of `pos2` from `pos1` on the UTC calendar day of `date`.
pub fn offset_of_date(pos1: &Position, pos2: &Position, date: &DateTime<Utc>) -> Offset {
    offset_of_years(pos1, pos2, crate::epoch::years_from_j2000(date))
}

/// The position `offset` points at from `pos1`.
///
/// The result is equatorial J2000 at epoch 2000.0 and keeps `pos1`'s proper
/// motion.
pub fn position_at(pos1: &Position, offset: &Offset) -> PositionJ2000 {
    let east = offset.delta_lon() * ARCSEC_TO_RAD;
    let north = offset.delta_lat() * ARCSEC_TO_RAD;

    let frame = tangent_frame(pos1.lon().radians(), pos1.lat().radians());
    let local = Vector3::from_spherical(east, north);
    let v = frame.transpose() * local;

    let lon = if v.xy_magnitude() == 0.0 {
        0.0
    } else {
        libm::atan2(v.y, v.x)
    };
    let lat = libm::atan2(v.z, v.xy_magnitude());

    PositionJ2000::from_canonical(Position::from_radians_normalized(
        lon,
        lat,
        CoordinateSystem::EQ_J2000,
        pos1.proper_motion(),
        J2000_YEAR,
    ))
}

/// The four corners of the box `radius_arcsec` around a center.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corners {
    pub upper_left: PositionJ2000,
    pub upper_right: PositionJ2000,
    pub lower_left: PositionJ2000,
    pub lower_right: PositionJ2000,
}

impl Corners {
    pub fn as_array(&self) -> [&PositionJ2000; 4] {
        [
            &self.upper_left,
            &self.upper_right,
            &self.lower_left,
            &self.lower_right,
        ]
    }
}

/// Corners of the box of half-width `radius_arcsec` centered on `center`.
///
/// Each side is found by offsetting the center east, west, north and south;
/// corners take the longitude of the east/west point and the latitude of the
/// north/south point. Near a pole, or where the box straddles RA 0, the
/// result is not a true bounding box.
pub fn corners(center: &Position, radius_arcsec: f64) -> Corners {
    let at = |east: f64, north: f64| position_at(center, &Offset::new(east, north, *center));
    let left = at(radius_arcsec, 0.0);
    let right = at(-radius_arcsec, 0.0);
    let up = at(0.0, radius_arcsec);
    let down = at(0.0, -radius_arcsec);

    let corner = |lon: &PositionJ2000, lat: &PositionJ2000| {
        PositionJ2000::from_canonical(Position::from_radians_normalized(
            lon.ra().radians(),
            lat.dec().radians(),
            CoordinateSystem::EQ_J2000,
            center.proper_motion(),
            J2000_YEAR,
        ))
    };

    Corners {
        upper_left: corner(&left, &up),
        upper_right: corner(&right, &up),
        lower_left: corner(&left, &down),
        lower_right: corner(&right, &down),
    }
}

/// Great-circle distance in degrees between two (lon, lat) pairs in degrees.
pub fn angular_distance_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    law_of_cosines_separation(
        lon1 * DEG_TO_RAD,
        lat1 * DEG_TO_RAD,
        lon2 * DEG_TO_RAD,
        lat2 * DEG_TO_RAD,
    ) * RAD_TO_DEG
}

/// Great-circle distance in degrees between two positions.
///
/// Positions in different systems or at different epochs are compared in
/// J2000.
pub fn angular_distance(a: &Position, b: &Position) -> CoordResult<f64> {
    if a.system() == b.system() && a.epoch() == b.epoch() {
        return Ok(angular_distance_deg(
            a.lon().degrees(),
            a.lat().degrees(),
            b.lon().degrees(),
            b.lat().degrees(),
        ));
    }
    let a = a.to_j2000()?;
    let b = b.to_j2000()?;
    Ok(angular_distance_deg(
        a.ra().degrees(),
        a.dec().degrees(),
        b.ra().degrees(),
        b.dec().degrees(),
    ))
}

/// Largest distance in degrees between any two of `positions`; 0 for fewer
/// than two.
pub fn max_pairwise_distance(positions: &[Position]) -> CoordResult<f64> {
    let mut max = 0.0_f64;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            max = max.max(angular_distance(a, b)?);
        }
    }
    Ok(max)
}

/// Position angle in degrees [0, 360) of (ra, dec) as seen from (ra0, dec0),
/// measured from north through east.
///
/// Points closer than about 0.08″ give 0. A reference at the north pole gives
/// 180 and one at the south pole gives 0.
pub fn position_angle(ra0: f64, dec0: f64, ra: f64, dec: f64) -> f64 {
    if dec0 == 90.0 {
        return 180.0;
    }
    if dec0 == -90.0 {
        return 0.0;
    }

    let (sd, cd) = libm::sincos(dec * DEG_TO_RAD);
    let (sd0, cd0) = libm::sincos(dec0 * DEG_TO_RAD);
    let dra = (ra - ra0) * DEG_TO_RAD;
    let cos_dra = libm::cos(dra);

    let dist = acos_clamped(sd * sd0 + cd * cd0 * cos_dra);
    if dist <= COLOCATED_RAD {
        return 0.0;
    }

    let sin_dist = libm::sin(dist);
    let cos_pa = (sd * cd0 - cd * sd0 * cos_dra) / sin_dist;
    let sin_pa = cd * libm::sin(dra) / sin_dist;

    let pa = acos_clamped(cos_pa) * RAD_TO_DEG;
    if sin_pa < 0.0 {
        360.0 - pa
    } else {
        pa
    }
}

/// Point reached from (lon, lat) after `distance` degrees along position
/// angle `bearing` degrees. Returns degrees with longitude in [0, 360).
pub fn destination(lon: f64, lat: f64, distance: f64, bearing: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = libm::sincos(lat * DEG_TO_RAD);
    let (sin_d, cos_d) = libm::sincos(distance * DEG_TO_RAD);
    let (sin_b, cos_b) = libm::sincos(bearing * DEG_TO_RAD);

    let new_lat = asin_clamped(cos_d * sin_lat + sin_d * cos_lat * cos_b);
    let cos_new_lat = libm::cos(new_lat);
    let dlon = if cos_new_lat.abs() > 1e-15 {
        acos_clamped((cos_d * cos_lat - sin_d * sin_lat * cos_b) / cos_new_lat)
    } else {
        0.0
    };

    let new_lon = if sin_b < 0.0 {
        lon * DEG_TO_RAD - dlon
    } else {
        lon * DEG_TO_RAD + dlon
    };

    (wrap_0_360(new_lon * RAD_TO_DEG), new_lat * RAD_TO_DEG)
}

/// Center of the lon/lat box around `positions` and the largest distance
/// (degrees) from it to any of them, all in J2000.
///
/// Returns `None` for an empty slice.
pub fn central_point_and_radius(
    positions: &[Position],
) -> CoordResult<Option<(PositionJ2000, f64)>> {
    if positions.is_empty() {
        return Ok(None);
    }

    let j2000 = positions
        .iter()
        .map(Position::to_j2000)
        .collect::<CoordResult<Vec<_>>>()?;

    let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in &j2000 {
        let (lon, lat) = (p.ra().degrees(), p.dec().degrees());
        min_lon = min_lon.min(lon);
        max_lon = max_lon.max(lon);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }
    if max_lon - min_lon > 180.0 {
        min_lon += 360.0;
    }

    let center = PositionJ2000::from_degrees(
        wrap_0_360((min_lon + max_lon) / 2.0),
        (min_lat + max_lat) / 2.0,
    )?;

    let radius = j2000
        .iter()
        .map(|p| {
            angular_distance_deg(
                center.ra().degrees(),
                center.dec().degrees(),
                p.ra().degrees(),
                p.dec().degrees(),
            )
        })
        .fold(0.0_f64, f64::max);

    Ok(Some((center, radius)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProperMotion;

    fn eq(lon: f64, lat: f64) -> Position {
        Position::from_degrees(lon, lat, CoordinateSystem::EQ_J2000).unwrap()
    }

    #[test]
    fn test_offset_due_north() {
        let o = offset_of(&eq(0.0, 0.0), &eq(0.0, 1.0));
        assert!(o.delta_lon().abs() < 1e-9);
        assert!((o.delta_lat() - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_reference_values() {
        let o = offset_of(&eq(10.0, 20.0), &eq(10.5, 20.7));
        assert!((o.delta_lon() - 1683.922_510).abs() < 1e-5);
        assert!((o.delta_lat() - 2522.512_980).abs() < 1e-5);
    }

    #[test]
    fn test_offset_across_seam() {
        let o = offset_of(&eq(359.8, -30.0), &eq(0.3, -29.5));
        assert!((o.delta_lon() - 1566.694_861).abs() < 1e-5);
        assert!((o.delta_lat() - 1796.582_013).abs() < 1e-5);
        let back = position_at(o.anchor(), &o);
        assert!((back.ra().degrees() - 0.3).abs() < 1e-9);
        assert!((back.dec().degrees() + 29.5).abs() < 1e-9);
    }

    #[test]
    fn test_offset_with_motion() {
        let pm = ProperMotion::new(0.0, 36.0).unwrap();
        let a = eq(10.0, 0.0);
        let b = eq(10.0, 0.0).with_proper_motion(pm);
        let o = offset_of_years(&a, &b, 100.0);
        assert!(o.delta_lon().abs() < 1e-6);
        assert!((o.delta_lat() - 3600.0).abs() < 1e-6);
        assert_eq!(offset_of_years(&a, &b, 0.0), offset_of(&a, &b));
    }

    #[test]
    fn test_position_at_keeps_anchor_motion() {
        let pm = ProperMotion::new(0.1, 0.2).unwrap();
        let anchor = eq(50.0, 10.0).with_proper_motion(pm);
        let p = position_at(&anchor, &Offset::new(10.0, 10.0, anchor));
        assert_eq!(p.proper_motion(), Some(pm));
        assert_eq!(p.position().epoch(), 2000.0);
    }

    #[test]
    fn test_corners_reference() {
        let c = corners(&eq(10.0, 60.0), 3600.0);
        assert!((c.upper_left.ra().degrees() - 11.999_391).abs() < 1e-6);
        assert!((c.upper_right.ra().degrees() - 8.000_609).abs() < 1e-6);
        assert!((c.upper_left.dec().degrees() - 61.0).abs() < 1e-9);
        assert!((c.lower_right.dec().degrees() - 59.0).abs() < 1e-9);
    }

    #[test]
    fn test_corners_straddle_seam() {
        let c = corners(&eq(0.0, 0.0), 3600.0);
        assert!((c.upper_left.ra().degrees() - 1.0).abs() < 1e-9);
        assert!((c.upper_right.ra().degrees() - 359.0).abs() < 1e-9);
    }

    #[test]
    fn test_angular_distance_scalar() {
        assert!((angular_distance_deg(0.0, 0.0, 180.0, 0.0) - 180.0).abs() < 1e-12);
        assert_eq!(angular_distance_deg(12.3, 45.6, 12.3, 45.6), 0.0);
        assert!((angular_distance_deg(0.0, 90.0, 123.0, 0.0) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_mixed_systems() {
        let gal = Position::from_degrees(0.0, 90.0, CoordinateSystem::GALACTIC).unwrap();
        let ngp = eq(192.859_483, 27.128_302);
        assert!(angular_distance(&gal, &ngp).unwrap() < 1e-5);
    }

    #[test]
    fn test_max_pairwise_distance() {
        let ps = [eq(0.0, 0.0), eq(1.0, 0.0), eq(0.0, 3.0)];
        let max = max_pairwise_distance(&ps).unwrap();
        assert!((max - angular_distance_deg(1.0, 0.0, 0.0, 3.0)).abs() < 1e-12);
        assert_eq!(max_pairwise_distance(&ps[..1]).unwrap(), 0.0);
    }

    #[test]
    fn test_position_angle_cardinal() {
        assert_eq!(position_angle(0.0, 0.0, 0.0, 1.0), 0.0);
        assert!((position_angle(0.0, 0.0, 1.0, 0.0) - 90.0).abs() < 1e-6);
        assert!((position_angle(0.0, 0.0, 0.0, -1.0) - 180.0).abs() < 1e-6);
        assert!((position_angle(0.0, 0.0, 359.0, 0.0) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_angle_special_cases() {
        assert_eq!(position_angle(10.0, 20.0, 10.0, 20.0), 0.0);
        assert_eq!(position_angle(10.0, 90.0, 50.0, 80.0), 180.0);
        assert_eq!(position_angle(10.0, -90.0, 50.0, -80.0), 0.0);
    }

    #[test]
    fn test_destination() {
        let (lon, lat) = destination(0.0, 0.0, 1.0, 90.0);
        assert!((lon - 1.0).abs() < 1e-9 && lat.abs() < 1e-12);
        let (lon, lat) = destination(10.0, 20.0, 1.0, 0.0);
        assert!((lon - 10.0).abs() < 1e-5 && (lat - 21.0).abs() < 1e-12);
        let (lon, lat) = destination(10.0, 20.0, 2.0, 45.0);
        assert!((lon - 11.518_884).abs() < 1e-6);
        assert!((lat - 21.407_658).abs() < 1e-6);
        assert!((position_angle(10.0, 20.0, lon, lat) - 45.0).abs() < 1e-6);
        let (lon, _) = destination(0.5, 0.0, 1.0, 270.0);
        assert!((lon - 359.5).abs() < 1e-9);
    }

    #[test]
    fn test_central_point_and_radius() {
        let ps = [eq(359.0, -1.0), eq(1.0, 1.0)];
        let (center, radius) = central_point_and_radius(&ps).unwrap().unwrap();
        assert!(center.ra().degrees().abs() < 1e-9 || (center.ra().degrees() - 360.0).abs() < 1e-9);
        assert!(center.dec().degrees().abs() < 1e-12);
        assert!((radius - angular_distance_deg(0.0, 0.0, 1.0, 1.0)).abs() < 1e-9);
        assert!(central_point_and_radius(&[]).unwrap().is_none());
    }
}
