//! Error types for the numeric core.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`MathError`](AstroError::MathError) | angle validation |
//! | [`InvalidSexagesimal`](AstroError::InvalidSexagesimal) | [`parse_sexagesimal`](crate::angle::parse_sexagesimal) |
//!
//! ```
//! use skypos_core::{Angle, AstroError, MathErrorKind};
//!
//! match Angle::from_degrees(95.0).validate_latitude() {
//!     Err(AstroError::MathError { kind, .. }) => assert_eq!(kind, MathErrorKind::OutOfRange),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// NaN or infinite input.
    NotFinite,
    /// Outside the axis range, e.g. a latitude beyond ±90°.
    OutOfRange,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AstroError {
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// A sexagesimal or decimal angle string that could not be read.
    #[error("Invalid sexagesimal string '{input}': {message}")]
    InvalidSexagesimal { input: String, message: String },
}

pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: impl Into<String>) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.into(),
        }
    }

    pub fn invalid_sexagesimal(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSexagesimal {
            input: input.into(),
            message: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_with_kind() {
        let err = AstroError::math_error(
            "validate_latitude",
            MathErrorKind::OutOfRange,
            "latitude 95.000000° outside [-90°, +90°]",
        );
        assert!(err.to_string().contains("Math error in validate_latitude"));
        assert!(err.to_string().contains("OutOfRange"));
    }

    #[test]
    fn test_invalid_sexagesimal_keeps_input() {
        let err = AstroError::invalid_sexagesimal("12h61m", "minutes must be below 60");
        assert_eq!(
            err.to_string(),
            "Invalid sexagesimal string '12h61m': minutes must be below 60"
        );
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<AstroError>();
        _assert_sync::<AstroError>();
    }
}
