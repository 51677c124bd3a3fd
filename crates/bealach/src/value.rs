// SPDX-License-Identifier: MIT OR Apache-2.0
//! The result of a query
//!
//! A [`Value`] borrows the exact bytes of the matched value from the document.
//! The unescaped string and the parsed number are worked out when asked for,
//! so a query that only checks [`Value::exists`] or reads [`Value::raw`] does
//! no decoding at all.

use crate::children::Children;
use crate::matcher;
use crate::scalar::Scalar;
use bealach_core::{BealachError, Kind, ParsedPath, Result, Token, unescape_if_needed};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// A matched JSON value, or the non-existent sentinel
#[derive(Clone, Default)]
pub struct Value<'a> {
    kind: Kind,
    raw: Cow<'a, [u8]>,
    exists: bool,
    whole_document: bool,
}

fn text_from_bytes(bytes: Cow<'_, [u8]>) -> Cow<'_, str> {
    match bytes {
        Cow::Borrowed(b) => String::from_utf8_lossy(b),
        Cow::Owned(v) => match String::from_utf8(v) {
            Ok(text) => Cow::Owned(text),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}

impl<'a> Value<'a> {
    /// The non-existent value
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            kind: Kind::Null,
            raw: Cow::Borrowed(&[]),
            exists: false,
            whole_document: false,
        }
    }

    pub(crate) fn from_token(doc: &'a [u8], token: Token) -> Self {
        Self {
            kind: token.kind,
            raw: Cow::Borrowed(token.bytes(doc)),
            exists: true,
            whole_document: false,
        }
    }

    pub(crate) fn count(n: usize) -> Self {
        let mut buf = itoa::Buffer::new();
        Self {
            kind: Kind::Number,
            raw: Cow::Owned(buf.format(n).as_bytes().to_vec()),
            exists: true,
            whole_document: false,
        }
    }

    pub(crate) const fn into_whole_document(mut self) -> Self {
        self.whole_document = true;
        self
    }

    /// Kind of the value; `Null` for a non-existent value
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// True unless no value matched
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }

    /// The exact matched bytes, quotes and brackets included
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The matched bytes as text, with invalid UTF-8 replaced
    #[must_use]
    pub fn json(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// True when the value is an object
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind == Kind::Json && self.raw.first() == Some(&b'{')
    }

    /// True when the value is an array
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind == Kind::Json && self.raw.first() == Some(&b'[')
    }

    /// Textual view: the unescaped text for strings, the raw text otherwise
    #[must_use]
    pub fn str(&self) -> Cow<'_, str> {
        if self.kind == Kind::String {
            text_from_bytes(unescape_if_needed(self.string_body()))
        } else {
            self.json()
        }
    }

    /// String body between the quotes
    fn string_body(&self) -> &[u8] {
        let raw: &[u8] = &self.raw;
        match raw {
            [b'"', body @ .., b'"'] => body,
            _ => raw.get(1..).unwrap_or_default(),
        }
    }

    /// Numeric view: the parsed number for numbers, zero otherwise
    #[must_use]
    pub fn num(&self) -> f64 {
        if self.kind != Kind::Number {
            return 0.0;
        }
        std::str::from_utf8(&self.raw)
            .ok()
            .and_then(|text| text.parse().ok())
            .unwrap_or(0.0)
    }

    /// Coerce to a scalar
    ///
    /// The whole-document match (empty path) always coerces to
    /// [`Scalar::Null`], as does a non-existent value.
    #[must_use]
    pub fn scalar(&self) -> Scalar<'_> {
        if !self.exists || self.whole_document {
            return Scalar::Null;
        }
        match self.kind {
            Kind::Null => Scalar::Null,
            Kind::False => Scalar::Bool(false),
            Kind::True => Scalar::Bool(true),
            Kind::Number => Scalar::Number(self.num()),
            Kind::String => Scalar::Text(self.str()),
            Kind::Json => Scalar::Text(self.json()),
        }
    }

    /// The boolean for `true` and `false`
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self.kind {
            Kind::True => Some(true),
            Kind::False => Some(false),
            _ => None,
        }
    }

    /// The number for numbers
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        (self.kind == Kind::Number).then(|| self.num())
    }

    /// The number for numbers that are integral and fit an `i64`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Option<i64> {
        if self.kind != Kind::Number {
            return None;
        }
        if let Some(n) = std::str::from_utf8(&self.raw)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
        {
            return Some(n);
        }
        let n = self.num();
        let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
        (n.fract() == 0.0 && in_range).then_some(n as i64)
    }

    /// The unescaped text for strings
    #[must_use]
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        (self.kind == Kind::String).then(|| self.str())
    }

    /// The raw bytes as UTF-8 text, without replacement
    ///
    /// # Errors
    ///
    /// Returns [`BealachError::InvalidUtf8`] when the matched bytes are not
    /// valid UTF-8.
    pub fn try_json(&self) -> Result<&str> {
        std::str::from_utf8(&self.raw).map_err(|err| BealachError::InvalidUtf8 {
            offset: err.valid_up_to(),
        })
    }

    /// Ordering used for sorting results
    ///
    /// Kinds rank `Null < False < True < Json < Number < String`. Numbers
    /// compare by value. Strings compare byte-wise, or with ASCII letters
    /// folded to uppercase when `case_sensitive` is false. Other values of
    /// the same kind compare by raw bytes.
    #[must_use]
    pub fn less(&self, other: &Value<'_>, case_sensitive: bool) -> bool {
        if self.kind != other.kind {
            return self.kind < other.kind;
        }
        match self.kind {
            Kind::String => {
                let (a, b) = (self.str(), other.str());
                if case_sensitive {
                    a.as_bytes() < b.as_bytes()
                } else {
                    less_insensitive(a.as_bytes(), b.as_bytes())
                }
            }
            Kind::Number => self.num() < other.num(),
            _ => self.raw() < other.raw(),
        }
    }

    /// Three-way form of [`Value::less`]
    #[must_use]
    pub fn compare(&self, other: &Value<'_>, case_sensitive: bool) -> Ordering {
        if self.less(other, case_sensitive) {
            Ordering::Less
        } else if other.less(self, case_sensitive) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Run a further query relative to this value
    #[must_use]
    pub fn get(&self, path: &str) -> Value<'_> {
        if !self.exists {
            return Value::missing();
        }
        let parsed = ParsedPath::parse(path);
        let value = matcher::resolve(&self.raw, &parsed);
        if parsed.is_empty() {
            value.into_whole_document()
        } else {
            value
        }
    }

    /// Iterate the immediate members of an object or array
    ///
    /// Scalars and non-existent values yield nothing.
    #[must_use]
    pub fn iter(&self) -> Children<'_> {
        Children::new(&self.raw, self.kind == Kind::Json)
    }

    /// Like [`Value::iter`], but rejects values that are not containers
    ///
    /// # Errors
    ///
    /// Returns [`BealachError::NotContainer`] for scalars and
    /// [`BealachError::NotFound`] for a non-existent value.
    pub fn try_iter(&self) -> Result<Children<'_>> {
        if !self.exists {
            return Err(BealachError::NotFound {
                path: String::new(),
            });
        }
        if self.kind != Kind::Json {
            return Err(BealachError::NotContainer(self.kind));
        }
        Ok(self.iter())
    }
}

/// ASCII case-insensitive "less than"
///
/// Letters compare uppercased; a tie on every shared byte falls back to
/// length, so case alone never orders two strings.
fn less_insensitive(a: &[u8], b: &[u8]) -> bool {
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x.to_ascii_uppercase(), y.to_ascii_uppercase());
        if x != y {
            return x < y;
        }
    }
    a.len() < b.len()
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.exists {
            return Ok(());
        }
        match self.kind {
            Kind::Null => f.write_str("null"),
            Kind::False => f.write_str("false"),
            Kind::True => f.write_str("true"),
            Kind::Number => write!(f, "{}", self.num()),
            Kind::String => f.write_str(&self.str()),
            Kind::Json => f.write_str(&self.json()),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.exists {
            return f.write_str("Value(missing)");
        }
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("raw", &self.json())
            .finish()
    }
}
