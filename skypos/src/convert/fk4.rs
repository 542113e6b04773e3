//! FK4 (B1950.0) ⇄ FK5 (J2000.0) equatorial conversion.
//!
//! FK4 positions include the elliptic terms of aberration (E-terms); they are
//! removed before the 6×6 position/velocity matrix is applied and restored on
//! the way back. Velocities inside the matrix product are in radians per
//! Julian century scaled by [`PMF`]; [`CatalogEntry`] carries rates in
//! radians per year.
//!
//! ```
//! use skypos::convert::fk4::{fk4_to_fk5_fixed, fk5_to_fk4_fixed};
//!
//! let (ra, dec) = fk4_to_fk5_fixed(0.0, 0.0);
//! assert!((ra.to_degrees() - 0.640691).abs() < 1e-6);
//! assert!((dec.to_degrees() - 0.278409).abs() < 1e-6);
//!
//! let (ra, dec) = fk5_to_fk4_fixed(ra, dec);
//! assert!(ra.sin().abs() < 1e-9 && dec.abs() < 1e-9);
//! ```

use skypos_core::constants::{
    B1900_MJD, B1950_YEAR, DAYS_PER_JULIAN_YEAR, DAYS_PER_TROPICAL_YEAR, J2000_MJD, J2000_YEAR,
    PI,
};
use skypos_core::{PvMatrix6, Vector3};

/// Radians per year to arcseconds per century.
pub const PMF: f64 = 100.0 * 60.0 * 60.0 * 360.0 / (2.0 * PI);

const TINY: f64 = 1e-30;

/// E-terms of aberration (radians).
const E_TERMS: Vector3 = Vector3 {
    x: -1.62557e-6,
    y: -0.31919e-6,
    z: -0.13843e-6,
};

/// Rate of change of the E-terms (arcseconds per century).
const E_TERMS_DOT: Vector3 = Vector3 {
    x: 1.245e-3,
    y: -1.580e-3,
    z: -0.659e-3,
};

#[allow(clippy::excessive_precision)]
const FK4_TO_FK5: PvMatrix6 = PvMatrix6::from_rows([
    [
        0.9999256782,
        -0.0111820611,
        -0.0048579477,
        0.00000242395018,
        -0.00000002710663,
        -0.00000001177656,
    ],
    [
        0.0111820610,
        0.9999374784,
        -0.0000271765,
        0.00000002710663,
        0.00000242397878,
        -0.00000000006587,
    ],
    [
        0.0048579479,
        -0.0000271474,
        0.9999881997,
        0.00000001177656,
        -0.00000000006582,
        0.00000242410173,
    ],
    [-0.000551, -0.238565, 0.435739, 0.99994704, -0.01118251, -0.00485767],
    [0.238514, -0.002667, -0.008541, 0.01118251, 0.99995883, -0.00002718],
    [-0.435623, 0.012254, 0.002117, 0.00485767, -0.00002714, 1.00000956],
]);

#[allow(clippy::excessive_precision)]
const FK5_TO_FK4: PvMatrix6 = PvMatrix6::from_rows([
    [
        0.9999256795,
        0.0111814828,
        0.0048590039,
        -0.00000242389840,
        -0.00000002710544,
        -0.00000001177742,
    ],
    [
        -0.0111814828,
        0.9999374849,
        -0.0000271771,
        0.00000002710544,
        -0.00000242392702,
        0.00000000006585,
    ],
    [
        -0.0048590040,
        -0.0000271557,
        0.9999881946,
        0.00000001177742,
        0.00000000006585,
        -0.00000242404995,
    ],
    [-0.000551, 0.238509, -0.435614, 0.99990432, 0.01118145, 0.00485852],
    [-0.238560, -0.002667, 0.012254, -0.01118145, 0.99991613, -0.00002717],
    [0.435730, -0.008541, 0.002117, -0.00485852, -0.00002716, 0.99996684],
]);

/// A catalogue position with its rates of change.
///
/// `ra_rate` is dRA/dt, not multiplied by cos(dec). All values are radians
/// or radians per year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub ra: f64,
    pub dec: f64,
    pub ra_rate: f64,
    pub dec_rate: f64,
}

impl CatalogEntry {
    pub fn fixed(ra: f64, dec: f64) -> Self {
        Self {
            ra,
            dec,
            ra_rate: 0.0,
            dec_rate: 0.0,
        }
    }

    fn position_velocity(&self) -> (Vector3, Vector3) {
        let (sr, cr) = libm::sincos(self.ra);
        let (sd, cd) = libm::sincos(self.dec);
        let ur = self.ra_rate * PMF;
        let ud = self.dec_rate * PMF;

        let position = Vector3::new(cr * cd, sr * cd, sd);
        let velocity = Vector3::new(
            -sr * cd * ur - cr * sd * ud,
            cr * cd * ur - sr * sd * ud,
            cd * ud,
        );
        (position, velocity)
    }

    fn from_position_velocity(position: Vector3, velocity: Vector3) -> Self {
        let (x, y, z) = (position.x, position.y, position.z);
        let rxysq = x * x + y * y;
        let rxy = libm::sqrt(rxysq);

        let ra = if rxysq > TINY {
            libm::atan2(y, x)
        } else {
            0.0
        };
        let dec = if z != 0.0 { libm::atan2(z, rxy) } else { 0.0 };

        let (ra_rate, dec_rate) = if rxy > TINY {
            let ur = (x * velocity.y - y * velocity.x) / rxysq;
            let ud = (velocity.z * rxysq - z * (x * velocity.x + y * velocity.y))
                / ((rxysq + z * z) * rxy);
            (ur / PMF, ud / PMF)
        } else {
            (0.0, 0.0)
        };

        Self {
            ra: skypos_core::angle::wrap_0_2pi(ra),
            dec,
            ra_rate,
            dec_rate,
        }
    }
}

/// FK4 B1950.0 to FK5 J2000.0, carrying proper motion.
pub fn fk4_to_fk5(entry: &CatalogEntry) -> CatalogEntry {
    let (r0, rd0) = entry.position_velocity();

    let w = r0.dot(&E_TERMS);
    let wd = r0.dot(&E_TERMS_DOT);
    let position = r0 - E_TERMS + r0 * w;
    let velocity = rd0 - E_TERMS_DOT + r0 * wd;

    let (position, velocity) = FK4_TO_FK5.apply(position, velocity);
    CatalogEntry::from_position_velocity(position, velocity)
}

/// FK5 J2000.0 to FK4 B1950.0, carrying proper motion.
pub fn fk5_to_fk4(entry: &CatalogEntry) -> CatalogEntry {
    let (r0, rd0) = entry.position_velocity();
    let (position, velocity) = FK5_TO_FK4.apply(r0, rd0);

    // Magnitude the E-terms scale with, taken after a first application.
    let rxyz = position.magnitude();
    let first = position + E_TERMS * rxyz - position * position.dot(&E_TERMS);
    let rxyz = first.magnitude();

    let w = position.dot(&E_TERMS);
    let wd = position.dot(&E_TERMS_DOT);
    let position = position + E_TERMS * rxyz - position * w;
    let velocity = velocity + E_TERMS_DOT * rxyz - position * wd;

    CatalogEntry::from_position_velocity(position, velocity)
}

/// FK4 B1950.0 to FK5 J2000.0 for an object with no FK5 proper motion.
///
/// The object is taken to be fixed in FK5; the fictitious FK4 motion that
/// implies is integrated from B1950 to J2000.
pub fn fk4_to_fk5_fixed(ra: f64, dec: f64) -> (f64, f64) {
    let r0 = Vector3::from_spherical(ra, dec);

    let w = r0.dot(&E_TERMS);
    let position = r0 - E_TERMS + r0 * w;

    let (position, velocity) = FK4_TO_FK5.apply(position, Vector3::new(0.0, 0.0, 0.0));

    let interval = (julian_epoch_of_besselian(B1950_YEAR) - J2000_YEAR) / PMF;
    let position = position + velocity * interval;

    let (ra, dec) = position.to_spherical();
    (skypos_core::angle::wrap_0_2pi(ra), dec)
}

/// FK5 J2000.0 to FK4 B1950.0 for an object with no proper motion.
pub fn fk5_to_fk4_fixed(ra: f64, dec: f64) -> (f64, f64) {
    let entry = fk5_to_fk4(&CatalogEntry::fixed(ra, dec));
    (entry.ra, entry.dec)
}

fn julian_epoch_of_besselian(besselian: f64) -> f64 {
    let mjd = B1900_MJD + (besselian - 1900.0) * DAYS_PER_TROPICAL_YEAR;
    J2000_YEAR + (mjd - J2000_MJD) / DAYS_PER_JULIAN_YEAR
}
