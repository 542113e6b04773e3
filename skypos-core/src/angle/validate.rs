//! Range checks for sky coordinates.

use super::core::Angle;
use super::normalize::wrap_0_2pi;
use crate::constants::{HALF_PI, TWOPI};
use crate::{AstroError, AstroResult, MathErrorKind};

fn finite(angle: Angle, operation: &str) -> AstroResult<f64> {
    let rad = angle.radians();
    if rad.is_finite() {
        Ok(rad)
    } else {
        Err(AstroError::math_error(
            operation,
            MathErrorKind::NotFinite,
            "angle is not finite",
        ))
    }
}

/// Accepts latitudes in [-90°, +90°].
pub fn validate_latitude(angle: Angle) -> AstroResult<Angle> {
    let rad = finite(angle, "validate_latitude")?;
    if (-HALF_PI..=HALF_PI).contains(&rad) {
        return Ok(angle);
    }
    Err(AstroError::math_error(
        "validate_latitude",
        MathErrorKind::OutOfRange,
        format!("latitude {:.6}° outside [-90°, +90°]", angle.degrees()),
    ))
}

/// Accepts longitudes in [0°, 360°). With `normalize` any finite value is
/// wrapped into that range instead of rejected.
pub fn validate_longitude(angle: Angle, normalize: bool) -> AstroResult<Angle> {
    let rad = finite(angle, "validate_longitude")?;
    if normalize {
        return Ok(Angle::from_radians(wrap_0_2pi(rad)));
    }
    if (0.0..TWOPI).contains(&rad) {
        return Ok(angle);
    }
    Err(AstroError::math_error(
        "validate_longitude",
        MathErrorKind::OutOfRange,
        format!("longitude {:.6}° outside [0°, 360°)", angle.degrees()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_limits() {
        assert!(validate_latitude(Angle::from_degrees(90.0)).is_ok());
        assert!(validate_latitude(Angle::from_degrees(-90.0)).is_ok());
        match validate_latitude(Angle::from_degrees(-90.5)) {
            Err(AstroError::MathError { kind, .. }) => assert_eq!(kind, MathErrorKind::OutOfRange),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_not_finite() {
        for result in [
            validate_latitude(Angle::from_radians(f64::NAN)),
            validate_longitude(Angle::from_radians(f64::INFINITY), true),
        ] {
            match result {
                Err(AstroError::MathError { kind, .. }) => {
                    assert_eq!(kind, MathErrorKind::NotFinite)
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_longitude_wraps_when_asked() {
        let lon = validate_longitude(Angle::from_degrees(-30.0), true).unwrap();
        assert!((lon.degrees() - 330.0).abs() < 1e-12);
        assert!(validate_longitude(Angle::from_degrees(-30.0), false).is_err());
        assert!(validate_longitude(Angle::from_degrees(360.0), false).is_err());
        assert!(validate_longitude(Angle::from_degrees(359.5), false).is_ok());
    }
}
