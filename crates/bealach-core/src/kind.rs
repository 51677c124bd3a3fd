// SPDX-License-Identifier: MIT OR Apache-2.0
//! The kind tag carried by every matched value

use serde::Serialize;
use std::fmt;

/// Kind of a matched JSON value
///
/// Variants are declared in ordering rank, so the derived `Ord` gives
/// `Null < False < True < Json < Number < String`. Objects and arrays share
/// the [`Kind::Json`] tag; the first raw byte tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// `null`, and the kind of a non-existent value
    #[default]
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// An object or an array, exposed as raw text
    Json,
    /// A number
    Number,
    /// A string
    String,
}

impl Kind {
    /// Classify a value from its first significant byte
    ///
    /// Returns `None` for bytes that cannot start a JSON value.
    #[must_use]
    pub const fn from_lead_byte(byte: u8) -> Option<Self> {
        match byte {
            b'{' | b'[' => Some(Self::Json),
            b'"' => Some(Self::String),
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            b'n' => Some(Self::Null),
            b'-' | b'0'..=b'9' => Some(Self::Number),
            _ => None,
        }
    }

    /// Lowercase name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::False => "false",
            Self::True => "true",
            Self::Json => "json",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        let ranked = [
            Kind::Null,
            Kind::False,
            Kind::True,
            Kind::Json,
            Kind::Number,
            Kind::String,
        ];
        for pair in ranked.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_from_lead_byte() {
        assert_eq!(Kind::from_lead_byte(b'{'), Some(Kind::Json));
        assert_eq!(Kind::from_lead_byte(b'['), Some(Kind::Json));
        assert_eq!(Kind::from_lead_byte(b'"'), Some(Kind::String));
        assert_eq!(Kind::from_lead_byte(b'-'), Some(Kind::Number));
        assert_eq!(Kind::from_lead_byte(b'7'), Some(Kind::Number));
        assert_eq!(Kind::from_lead_byte(b't'), Some(Kind::True));
        assert_eq!(Kind::from_lead_byte(b'f'), Some(Kind::False));
        assert_eq!(Kind::from_lead_byte(b'n'), Some(Kind::Null));
        assert_eq!(Kind::from_lead_byte(b'x'), None);
        assert_eq!(Kind::from_lead_byte(b'}'), None);
    }

    #[test]
    fn test_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Json).unwrap(), "\"json\"");
        assert_eq!(serde_json::to_string(&Kind::Number).unwrap(), "\"number\"");
    }
}
