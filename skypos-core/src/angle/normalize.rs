//! Angle normalization.
//!
//! | Quantity | Range | Function |
//! |----------|-------|----------|
//! | Longitude, RA (radians) | [0, 2π) | [`wrap_0_2pi`] |
//! | Longitude, RA (degrees) | [0, 360) | [`wrap_0_360`] |
//! | Latitude, Dec (radians) | [-π/2, +π/2] | [`clamp_dec`] |
//!
//! **Wrapping** preserves the direction on the sphere: 370° and 10° are the
//! same longitude. **Clamping** enforces a physical limit: there is no latitude
//! beyond the pole, so a computed 90.0000000001° is pulled back to 90°.
//!
//! The wrapping functions use `libm::fmod` (via [`crate::math::fmod`]), which
//! keeps the sign of the dividend, then shift negative results up by one turn.
//!
//! ```
//! use skypos_core::angle::{wrap_0_360, clamp_dec};
//! use std::f64::consts::PI;
//!
//! assert_eq!(wrap_0_360(-90.0), 270.0);
//! assert_eq!(wrap_0_360(720.0), 0.0);
//! assert!((clamp_dec(2.0) - PI / 2.0).abs() < 1e-10);
//! ```

use crate::constants::{HALF_PI, TWOPI};
use crate::math::fmod;

/// Wraps an angle in radians to [0, 2π).
#[inline]
pub fn wrap_0_2pi(x: f64) -> f64 {
    let w = fmod(x, TWOPI);
    if w < 0.0 {
        let shifted = w + TWOPI;
        if shifted >= TWOPI {
            0.0
        } else {
            shifted
        }
    } else {
        w
    }
}

/// Wraps an angle in degrees to [0, 360).
///
/// A tiny negative input such as `-1e-15` would land on exactly 360.0 after
/// the shift; that case folds back to 0.
#[inline]
pub fn wrap_0_360(deg: f64) -> f64 {
    let w = fmod(deg, 360.0);
    if w < 0.0 {
        let shifted = w + 360.0;
        if shifted >= 360.0 {
            0.0
        } else {
            shifted
        }
    } else {
        w
    }
}

/// Clamps an angle in radians to [-π/2, +π/2].
#[inline]
pub fn clamp_dec(x: f64) -> f64 {
    x.clamp(-HALF_PI, HALF_PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PI;

    #[test]
    fn test_wrap_0_2pi() {
        // In range: unchanged
        assert_eq!(wrap_0_2pi(1.0), 1.0);
        // Negative becomes positive: -90° -> 270°
        assert!((wrap_0_2pi(-PI / 2.0) - (3.0 * PI / 2.0)).abs() < 1e-15);
        // Overflow: 3π -> π
        assert!((wrap_0_2pi(3.0 * PI) - PI).abs() < 1e-15);
        // At 2π: wraps to 0
        assert!(wrap_0_2pi(TWOPI).abs() < 1e-15);
    }

    #[test]
    fn test_wrap_0_360() {
        assert_eq!(wrap_0_360(10.0), 10.0);
        assert_eq!(wrap_0_360(-10.0), 350.0);
        assert_eq!(wrap_0_360(360.0), 0.0);
        assert_eq!(wrap_0_360(-360.0), 0.0);
        assert_eq!(wrap_0_360(725.5), 5.5);
    }

    #[test]
    fn test_wrap_0_360_tiny_negative() {
        let w = wrap_0_360(-1e-15);
        assert!((0.0..360.0).contains(&w));
    }

    #[test]
    fn test_clamp_dec() {
        assert_eq!(clamp_dec(0.5), 0.5);
        assert_eq!(clamp_dec(HALF_PI), HALF_PI);
        assert_eq!(clamp_dec(2.0), HALF_PI);
        assert_eq!(clamp_dec(-2.0), -HALF_PI);
    }
}
