//! Error types for fallible collection operations.
//!
//! The iteration engine itself never fails; errors come from the callbacks
//! plugged into it. The dynamic builders in [`maps`](crate::maps) and
//! [`reductions`](crate::reductions) report their failures with [`Error`],
//! and the `try_` operations of [`iteration`](crate::iteration) hand the
//! first one back to the caller unchanged.

use thiserror::Error;

/// Represents the errors raised by dynamic builders and façades.
///
/// # Examples
///
/// ```rust
/// use keylists::Error;
///
/// let error = Error::KeyNotFound { key: "name".to_string() };
/// assert_eq!(format!("{error}"), "key name does not exist");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A path walk reached a segment the structure does not contain.
    #[error("key {key} does not exist")]
    KeyNotFound {
        /// The missing path segment, rendered as text.
        key: String,
    },

    /// An operation received a value of the wrong dynamic type.
    #[error("{operation}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The operation that rejected the value.
        operation: &'static str,
        /// The type the operation accepts.
        expected: &'static str,
        /// The type that was supplied.
        found: &'static str,
    },

    /// An integer division or remainder by zero.
    #[error("{operation}: division by zero")]
    DivisionByZero {
        /// The operation that divided.
        operation: &'static str,
    },

    /// A regular expression failed to compile.
    #[cfg(feature = "value")]
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn type_mismatch(
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            operation,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_key_not_found_display() {
        let error = Error::KeyNotFound {
            key: "b".to_string(),
        };
        assert_eq!(format!("{error}"), "key b does not exist");
    }

    #[rstest]
    fn test_type_mismatch_display() {
        let error = Error::type_mismatch("merge", "array", "string");
        assert_eq!(format!("{error}"), "merge: expected array, found string");
    }

    #[rstest]
    fn test_division_by_zero_display() {
        let error = Error::DivisionByZero {
            operation: "modulo",
        };
        assert_eq!(format!("{error}"), "modulo: division by zero");
    }

    #[cfg(feature = "value")]
    #[rstest]
    #[allow(clippy::invalid_regex)]
    fn test_invalid_pattern_converts_from_regex_error() {
        let regex_error = regex::Regex::new("(").unwrap_err();
        let error: Error = regex_error.into();
        assert!(matches!(error, Error::InvalidPattern(_)));
        assert!(format!("{error}").starts_with("invalid pattern"));
    }

    #[rstest]
    fn test_error_source_is_none_for_plain_variants() {
        use std::error::Error as _;

        let error = Error::KeyNotFound {
            key: "a".to_string(),
        };
        assert!(error.source().is_none());
    }

    #[rstest]
    fn test_error_equality() {
        let first = Error::type_mismatch("offset", "number", "array");
        let second = Error::type_mismatch("offset", "number", "array");
        let third = Error::type_mismatch("scale", "number", "array");
        assert_eq!(first, second);
        assert_ne!(first, third);
    }
}
