#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_PER_RAD: f64 = 206264.8062470963551564734;

pub const ARCSEC_PER_DEG: f64 = 3600.0;

pub const ARCMIN_PER_DEG: f64 = 60.0;

pub const DEG_PER_HOUR: f64 = 15.0;

pub const J2000_JD: f64 = 2451545.0;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Length of the tropical year at B1900, in days.
pub const DAYS_PER_TROPICAL_YEAR: f64 = 365.242198781;

/// MJD of the Besselian epoch B1900.0.
pub const B1900_MJD: f64 = 15019.81352;

/// MJD of the Julian epoch J2000.0.
pub const J2000_MJD: f64 = 51544.5;

pub const B1950_YEAR: f64 = 1950.0;

pub const J2000_YEAR: f64 = 2000.0;

/// Julian date of the Besselian epoch B1950.0.
pub const B1950_JD: f64 = 2433282.4235;
