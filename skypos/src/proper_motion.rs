use crate::{CoordError, CoordResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Apparent angular drift of an object, in arcseconds per year.
///
/// `lon_rate` is measured along the sky, so for equatorial coordinates it is
/// μα·cos δ rather than the raw rate of change of right ascension.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProperMotion {
    lon_rate: f64,
    lat_rate: f64,
}

impl ProperMotion {
    pub const ZERO: Self = Self {
        lon_rate: 0.0,
        lat_rate: 0.0,
    };

    pub fn new(lon_rate: f64, lat_rate: f64) -> CoordResult<Self> {
        if !lon_rate.is_finite() || !lat_rate.is_finite() {
            return Err(CoordError::invalid_coordinate(format!(
                "proper motion must be finite, got ({lon_rate}, {lat_rate}) arcsec/yr"
            )));
        }
        Ok(Self { lon_rate, lat_rate })
    }

    pub fn lon_rate(&self) -> f64 {
        self.lon_rate
    }

    pub fn lat_rate(&self) -> f64 {
        self.lat_rate
    }

    pub fn is_zero(&self) -> bool {
        self.lon_rate == 0.0 && self.lat_rate == 0.0
    }
}

impl fmt::Display for ProperMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PM(lon={:.6}\"/yr, lat={:.6}\"/yr)",
            self.lon_rate, self.lat_rate
        )
    }
}
