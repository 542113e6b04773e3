use skypos_core::AstroError;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type CoordResult<T> = Result<T, CoordError>;

#[derive(Debug, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordError {
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    #[error("Invalid sexagesimal format '{input}': {reason}")]
    InvalidSexagesimalFormat { input: String, reason: String },

    #[error("Unsupported coordinate system: {message}")]
    UnsupportedCoordinateSystem { message: String },

    #[error("Core astronomical calculation failed: {message}")]
    CoreError { message: String },

    #[error("Data parsing failed: {message}")]
    ParsingError { message: String },
}

impl CoordError {
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    pub fn invalid_sexagesimal(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSexagesimalFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_system(message: impl Into<String>) -> Self {
        Self::UnsupportedCoordinateSystem {
            message: message.into(),
        }
    }

    pub fn parsing_error(message: impl Into<String>) -> Self {
        Self::ParsingError {
            message: message.into(),
        }
    }

    pub fn from_core(error: AstroError) -> Self {
        match error {
            AstroError::InvalidSexagesimal { input, message } => Self::InvalidSexagesimalFormat {
                input,
                reason: message,
            },
            AstroError::MathError { message, .. } => Self::InvalidCoordinate { message },
            other => Self::CoreError {
                message: other.to_string(),
            },
        }
    }
}

impl From<AstroError> for CoordError {
    fn from(error: AstroError) -> Self {
        Self::from_core(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skypos_core::MathErrorKind;

    #[test]
    fn test_unsupported_system() {
        let err = CoordError::unsupported_system("equatorial equinox 1975");
        assert!(err.to_string().contains("equatorial equinox 1975"));
    }

    #[test]
    fn test_core_sexagesimal_error_keeps_input() {
        let core = AstroError::invalid_sexagesimal("12h99m", "minutes and seconds must be below 60");
        match CoordError::from(core) {
            CoordError::InvalidSexagesimalFormat { input, reason } => {
                assert_eq!(input, "12h99m");
                assert!(reason.contains("below 60"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_core_range_error_is_invalid_coordinate() {
        let core = AstroError::math_error(
            "validate_latitude",
            MathErrorKind::OutOfRange,
            "latitude 95.000000° outside [-90°, +90°]",
        );
        assert!(matches!(
            CoordError::from(core),
            CoordError::InvalidCoordinate { .. }
        ));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<CoordError>();
        _assert_sync::<CoordError>();
    }
}
