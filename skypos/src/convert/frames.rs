//! Fixed frame rotations.
//!
//! Every supported frame is a rotation of one of the two base equatorial
//! frames: FK4 B1950.0 or FK5 J2000.0. Galactic, supergalactic and ecliptic
//! B1950 hang off FK4; ecliptic J2000 hangs off FK5.

use crate::ConversionCode;
use once_cell::sync::Lazy;
use skypos_core::constants::{B1950_YEAR, DEG_TO_RAD, HALF_PI, J2000_YEAR};
use skypos_core::obliquity::obliquity_at_equinox;
use skypos_core::{RotationMatrix3, Vector3};

/// The equatorial frame a [`ConversionCode`] is defined against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BaseFrame {
    Fk4B1950,
    Fk5J2000,
}

/// Rotation taking a frame vector to a vector in a parent frame, from the
/// Euler angles (degrees) of the frame's pole and node.
fn euler_to_parent(psi: f64, theta: f64, phi: f64) -> RotationMatrix3 {
    let mut m = RotationMatrix3::identity();
    m.rotate_z(-psi * DEG_TO_RAD);
    m.rotate_x(-theta * DEG_TO_RAD);
    m.rotate_z(-phi * DEG_TO_RAD);
    m
}

/// Galactic to FK4 B1950.0 equatorial.
pub static GALACTIC_TO_FK4: Lazy<RotationMatrix3> =
    Lazy::new(|| euler_to_parent(-33.0, 62.6, 282.25));

/// Supergalactic to galactic.
pub static SUPERGALACTIC_TO_GALACTIC: Lazy<RotationMatrix3> =
    Lazy::new(|| euler_to_parent(0.0, 83.68, 137.37));

/// Ecliptic to equatorial, both of the given equinox.
pub fn ecliptic_to_equatorial(equinox: f64) -> RotationMatrix3 {
    let mut m = RotationMatrix3::identity();
    m.rotate_x(obliquity_at_equinox(equinox));
    m.transpose()
}

/// The base frame of `code` and the rotation from `code`'s frame into it.
pub fn to_base(code: ConversionCode) -> (BaseFrame, RotationMatrix3) {
    match code {
        ConversionCode::EquatorialB1950 => (BaseFrame::Fk4B1950, RotationMatrix3::identity()),
        ConversionCode::EquatorialJ2000 => (BaseFrame::Fk5J2000, RotationMatrix3::identity()),
        ConversionCode::EclipticB1950 => {
            (BaseFrame::Fk4B1950, ecliptic_to_equatorial(B1950_YEAR))
        }
        ConversionCode::EclipticJ2000 => {
            (BaseFrame::Fk5J2000, ecliptic_to_equatorial(J2000_YEAR))
        }
        ConversionCode::Galactic => (BaseFrame::Fk4B1950, *GALACTIC_TO_FK4),
        ConversionCode::Supergalactic => (
            BaseFrame::Fk4B1950,
            GALACTIC_TO_FK4.multiply(&SUPERGALACTIC_TO_GALACTIC),
        ),
    }
}

/// Longitude and latitude (radians) of a unit vector.
///
/// A vector on or past a pole gets longitude 0 and latitude ±π/2.
pub fn lon_lat(v: &Vector3) -> (f64, f64) {
    if v.z >= 1.0 {
        return (0.0, HALF_PI);
    }
    if v.z <= -1.0 {
        return (0.0, -HALF_PI);
    }
    let (lon, _) = v.to_spherical();
    (lon, libm::asin(v.z))
}
