use super::normalize::wrap_0_2pi;
use super::validate;
use crate::constants::{
    ARCSEC_PER_RAD, DEG_PER_HOUR, DEG_TO_RAD, HALF_PI as HALF_PI_RAD, PI as PI_RAD, RAD_TO_DEG,
};
use crate::AstroResult;
use std::fmt;

/// A plane angle, stored in radians.
///
/// Construct from whichever unit you have and read back in whichever unit you
/// need. Conversions are exact multiplications; no normalization is applied
/// unless you ask for it with [`wrapped`](Self::wrapped) or one of the
/// `validate_*` methods.
///
/// ```
/// use skypos_core::Angle;
///
/// let ra = Angle::from_hours(12.0);
/// assert!((ra.degrees() - 180.0).abs() < 1e-12);
///
/// let offset = Angle::from_arcseconds(3600.0);
/// assert!((offset.degrees() - 1.0).abs() < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    pub const ZERO: Self = Self { rad: 0.0 };
    pub const PI: Self = Self { rad: PI_RAD };
    pub const HALF_PI: Self = Self { rad: HALF_PI_RAD };

    #[inline]
    pub const fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg * DEG_TO_RAD,
        }
    }

    /// One hour of angle is 15 degrees.
    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self::from_degrees(hours * DEG_PER_HOUR)
    }

    #[inline]
    pub fn from_arcseconds(arcsec: f64) -> Self {
        Self {
            rad: arcsec / ARCSEC_PER_RAD,
        }
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.rad * RAD_TO_DEG
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.degrees() / DEG_PER_HOUR
    }

    #[inline]
    pub fn arcseconds(self) -> f64 {
        self.rad * ARCSEC_PER_RAD
    }

    #[inline]
    pub fn sin(self) -> f64 {
        libm::sin(self.rad)
    }

    #[inline]
    pub fn cos(self) -> f64 {
        libm::cos(self.rad)
    }

    /// The same direction expressed in [0, 2π).
    #[inline]
    pub fn wrapped(self) -> Self {
        Self {
            rad: wrap_0_2pi(self.rad),
        }
    }

    pub fn validate_longitude(self, normalize: bool) -> AstroResult<Self> {
        validate::validate_longitude(self, normalize)
    }

    pub fn validate_latitude(self) -> AstroResult<Self> {
        validate::validate_latitude(self)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trips() {
        let a = Angle::from_degrees(123.456);
        assert!((a.degrees() - 123.456).abs() < 1e-12);
        assert!((Angle::from_hours(a.hours()).degrees() - 123.456).abs() < 1e-12);
        assert!((Angle::from_arcseconds(a.arcseconds()).degrees() - 123.456).abs() < 1e-12);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Angle::ZERO.radians(), 0.0);
        assert!((Angle::PI.degrees() - 180.0).abs() < 1e-12);
        assert!((Angle::HALF_PI.degrees() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrapped() {
        let a = Angle::from_degrees(-10.0).wrapped();
        assert!((a.degrees() - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Angle::from_degrees(45.123456789)), "45.123457°");
    }

    #[test]
    fn test_validate_methods_delegate() {
        assert!(Angle::from_degrees(91.0).validate_latitude().is_err());
        let lon = Angle::from_degrees(370.0).validate_longitude(true).unwrap();
        assert!((lon.degrees() - 10.0).abs() < 1e-12);
    }
}
