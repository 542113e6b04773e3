//! Mean obliquity of the ecliptic.
//!
//! The obliquity is the angle between the equatorial plane and the ecliptic.
//! Ecliptic coordinates of a given equinox are the equatorial coordinates of
//! that equinox rotated about the x-axis by this angle.
//!
//! ```
//! use skypos_core::obliquity::{iau_1980_mean_obliquity, obliquity_at_equinox};
//! use skypos_core::constants::J2000_JD;
//!
//! let eps = iau_1980_mean_obliquity(J2000_JD, 0.0);
//! assert!((eps.to_degrees() - 23.4392911).abs() < 1e-7);
//!
//! let eps_b1950 = obliquity_at_equinox(1950.0);
//! assert!((eps_b1950.to_degrees() - 23.44579).abs() < 1e-5);
//! ```

use crate::constants::{
    B1900_MJD, B1950_JD, B1950_YEAR, DAYS_PER_JULIAN_CENTURY, DAYS_PER_TROPICAL_YEAR, J2000_JD,
    MJD_ZERO_POINT, PI,
};

/// Mean obliquity of the ecliptic using the IAU 1980 model.
///
/// Takes a two-part Julian Date and returns radians.
///
/// At J2000.0: ε₀ = 84381.448″ ≈ 23°26′21.448″
pub fn iau_1980_mean_obliquity(date1: f64, date2: f64) -> f64 {
    let t = ((date1 - J2000_JD) + date2) / DAYS_PER_JULIAN_CENTURY;

    let obliquity_arcsec = 84381.448 + (-46.8150 + (-0.00059 + (0.001813) * t) * t) * t;

    obliquity_arcsec * (PI / (180.0 * 3600.0))
}

/// Mean obliquity (radians) at a Besselian equinox year such as 1950.0, or
/// at J2000.0 when `equinox` is 2000.
pub fn obliquity_at_equinox(equinox: f64) -> f64 {
    if equinox == B1950_YEAR {
        return iau_1980_mean_obliquity(B1950_JD, 0.0);
    }
    if equinox == 2000.0 {
        return iau_1980_mean_obliquity(J2000_JD, 0.0);
    }
    let mjd = B1900_MJD + (equinox - 1900.0) * DAYS_PER_TROPICAL_YEAR;
    iau_1980_mean_obliquity(MJD_ZERO_POINT, mjd)
}
