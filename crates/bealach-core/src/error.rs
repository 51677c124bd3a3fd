// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for bealach
//!
//! Queries themselves never fail: a missing or unreachable path is reported
//! through a non-existent value. The errors here cover the strict layers built
//! on top of that, such as typed scalar conversion and required lookups.

use crate::kind::Kind;
use thiserror::Error;

/// Errors raised by the strict accessors layered over a query result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BealachError {
    /// A path that had to resolve did not match anything
    #[error("path not found: {path:?}")]
    NotFound {
        /// The query path as supplied by the caller
        path: String,
    },

    /// A scalar was converted into a type it does not hold
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the requested destination type
        expected: &'static str,
        /// Name of the scalar variant that was present
        found: &'static str,
    },

    /// Raw document bytes were required as text but are not valid UTF-8
    #[error("invalid UTF-8 in raw value at byte {offset}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte within the raw value
        offset: usize,
    },

    /// A value of the wrong kind was found where a container was needed
    #[error("expected a container, found {0}")]
    NotContainer(Kind),
}

/// Result type alias for bealach operations
pub type Result<T> = std::result::Result<T, BealachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = BealachError::NotFound {
            path: "a.b".to_string(),
        };
        assert_eq!(err.to_string(), "path not found: \"a.b\"");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = BealachError::TypeMismatch {
            expected: "bool",
            found: "number",
        };
        assert_eq!(err.to_string(), "type mismatch: expected bool, found number");
    }

    #[test]
    fn test_not_container_display() {
        let err = BealachError::NotContainer(Kind::String);
        assert_eq!(err.to_string(), "expected a container, found string");
    }
}
