#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// `acos` with the argument clamped to [-1, 1] so rounding never yields NaN.
#[inline]
pub fn acos_clamped(x: f64) -> f64 {
    libm::acos(x.clamp(-1.0, 1.0))
}

#[inline]
pub fn asin_clamped(x: f64) -> f64 {
    libm::asin(x.clamp(-1.0, 1.0))
}

/// Great-circle separation in radians by the spherical law of cosines.
///
/// All arguments are radians. The cosine is clamped before `acos` to absorb
/// rounding; coincident inputs short-circuit to exactly zero.
#[inline]
pub fn law_of_cosines_separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    if lon1 == lon2 && lat1 == lat2 {
        return 0.0;
    }
    let (sin_lat1, cos_lat1) = libm::sincos(lat1);
    let (sin_lat2, cos_lat2) = libm::sincos(lat2);
    let cos_c = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * libm::cos(lon1 - lon2);
    acos_clamped(cos_c)
}
