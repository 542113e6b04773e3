//! Cartesian vectors on (or near) the unit sphere.
//!
//! The usual round trip is spherical → [`Vector3::from_spherical`] → rotate →
//! [`Vector3::to_spherical`]. Angles are radians throughout.
//!
//! ```
//! use skypos_core::Vector3;
//!
//! let v = Vector3::from_spherical(0.5, 0.3);
//! let (lon, lat) = v.to_spherical();
//! assert!((lon - 0.5).abs() < 1e-15);
//! assert!((lat - 0.3).abs() < 1e-15);
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Length of the projection onto the x-y plane.
    #[inline]
    pub fn xy_magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Unit vector for longitude `lon` and latitude `lat` (radians).
    pub fn from_spherical(lon: f64, lat: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon);
        let (sin_lat, cos_lat) = libm::sincos(lat);
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Longitude in (-π, π] and latitude in [-π/2, π/2], in radians.
    ///
    /// A vector along the pole has no defined longitude; 0 is returned.
    pub fn to_spherical(&self) -> (f64, f64) {
        let rxy = self.xy_magnitude();

        let lon = if rxy == 0.0 {
            0.0
        } else {
            libm::atan2(self.y, self.x)
        };
        let lat = if self.z == 0.0 {
            0.0
        } else {
            libm::atan2(self.z, rxy)
        };

        (lon, lat)
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.9}, {:.9}, {:.9}]", self.x, self.y, self.z)
    }
}
