// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scalar coercion of matched values

use bealach_core::{BealachError, Result};
use std::borrow::Cow;
use std::fmt;

/// A matched value coerced to a plain scalar
///
/// Objects and arrays are not decoded: they come through as their raw text
/// in [`Scalar::Text`]. Query with a longer path to reach inside them.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    /// `null`, a non-existent value, or the whole-document match
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number
    Number(f64),
    /// An unescaped string, or the raw text of an object or array
    Text(Cow<'a, str>),
}

impl Scalar<'_> {
    /// True for [`Scalar::Null`]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean, if this is one
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text, if this is text
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Name of the variant, as used in conversion errors
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }

    /// Detach from the document
    #[must_use]
    pub fn into_owned(self) -> Scalar<'static> {
        match self {
            Self::Null => Scalar::Null,
            Self::Bool(b) => Scalar::Bool(b),
            Self::Number(n) => Scalar::Number(n),
            Self::Text(text) => Scalar::Text(Cow::Owned(text.into_owned())),
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn mismatch(expected: &'static str, found: &Scalar<'_>) -> BealachError {
    BealachError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl TryFrom<Scalar<'_>> for bool {
    type Error = BealachError;

    fn try_from(scalar: Scalar<'_>) -> Result<Self> {
        scalar.as_bool().ok_or_else(|| mismatch("bool", &scalar))
    }
}

impl TryFrom<Scalar<'_>> for f64 {
    type Error = BealachError;

    fn try_from(scalar: Scalar<'_>) -> Result<Self> {
        scalar.as_f64().ok_or_else(|| mismatch("number", &scalar))
    }
}

impl TryFrom<Scalar<'_>> for String {
    type Error = BealachError;

    fn try_from(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Text(text) => Ok(text.into_owned()),
            other => Err(mismatch("text", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Scalar::Null.is_null());
        assert_eq!(Scalar::Bool(true).as_bool(), Some(true));
        assert_eq!(Scalar::Number(2.5).as_f64(), Some(2.5));
        assert_eq!(Scalar::Text(Cow::Borrowed("x")).as_str(), Some("x"));
        assert_eq!(Scalar::Number(1.0).as_str(), None);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(bool::try_from(Scalar::Bool(false)), Ok(false));
        assert_eq!(f64::try_from(Scalar::Number(3.0)), Ok(3.0));
        assert_eq!(
            String::try_from(Scalar::Text(Cow::Borrowed("hi"))),
            Ok("hi".to_string())
        );
        assert_eq!(
            bool::try_from(Scalar::Null),
            Err(BealachError::TypeMismatch {
                expected: "bool",
                found: "null",
            })
        );
        assert_eq!(
            f64::try_from(Scalar::Text(Cow::Borrowed("1"))),
            Err(BealachError::TypeMismatch {
                expected: "number",
                found: "text",
            })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Number(100.0).to_string(), "100");
        assert_eq!(Scalar::Text(Cow::Borrowed("a b")).to_string(), "a b");
    }

    #[test]
    fn test_into_owned() {
        let text = String::from("owned");
        let scalar = Scalar::Text(Cow::Borrowed(text.as_str())).into_owned();
        drop(text);
        assert_eq!(scalar.as_str(), Some("owned"));
    }
}
