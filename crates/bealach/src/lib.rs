// SPDX-License-Identifier: MIT OR Apache-2.0
//! # bealach
//!
//! Fast, read-only dot-path queries over raw JSON text.
//!
//! `bealach` finds a value inside a JSON document without building a tree.
//! The document is walked once, left to right; values off the path are
//! skipped structurally and the match is returned as a borrowed slice of the
//! input with lazily decoded string and number views.
//!
//! ```
//! let json = r#"{"name":{"first":"Tom","last":"Anderson"},"age":37,"tags":["a","b"]}"#;
//!
//! assert_eq!(bealach::get(json, "name.last").to_string(), "Anderson");
//! assert_eq!(bealach::get(json, "age").num(), 37.0);
//! assert_eq!(bealach::get(json, "tags.#").to_string(), "2");
//! assert_eq!(bealach::get(json, "tags.1").to_string(), "b");
//! assert_eq!(bealach::get(json, "n*.f?rst").to_string(), "Tom");
//! assert!(!bealach::get(json, "name.middle").exists());
//! ```
//!
//! ## Path syntax
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `.` | segment delimiter |
//! | `\.` `\*` `\?` | literal `.`, `*`, `?` inside a key |
//! | `*` | any run of characters, including none |
//! | `?` | exactly one character |
//! | `#` | element count of an object or array (as the last segment) |
//! | digits | zero-based array position |
//! | empty path | the whole document |
//!
//! ## Malformed input
//!
//! The engine does not validate. Structure it cannot follow makes the
//! affected branch non-existent; it never panics and never reads out of
//! bounds, whatever the input bytes.
//!
//! ## Modules
//!
//! - [`value`] - The matched value and its accessors
//! - [`scalar`] - Scalar coercion of matched values
//! - [`children`] - Iteration over object and array members

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

/// Member iteration
pub mod children;
mod matcher;
/// Scalar coercion
pub mod scalar;
/// The matched value
pub mod value;

pub use bealach_core::{BealachError, Kind, ParsedPath, Result, unescape, unescape_bytes};
pub use children::Children;
pub use scalar::Scalar;
pub use value::Value;

use tracing::trace;

/// Look up `path` in a JSON document
///
/// Returns a non-existent [`Value`] when nothing matches.
#[must_use]
pub fn get<'a>(json: &'a str, path: &str) -> Value<'a> {
    get_bytes(json.as_bytes(), path)
}

/// Look up `path` in a JSON document given as bytes
///
/// The document does not have to be valid UTF-8.
#[must_use]
pub fn get_bytes<'a>(json: &'a [u8], path: &str) -> Value<'a> {
    let parsed = ParsedPath::parse(path);
    let value = query(json, &parsed);
    trace!(
        path,
        segments = parsed.len(),
        len = json.len(),
        found = value.exists(),
        "query resolved"
    );
    value
}

/// Look up an already parsed path
///
/// Parse once and reuse the path when querying many documents.
#[must_use]
pub fn query<'a>(json: &'a [u8], path: &ParsedPath<'_>) -> Value<'a> {
    let value = matcher::resolve(json, path);
    if path.is_empty() {
        value.into_whole_document()
    } else {
        value
    }
}

/// Look up several paths in one document
#[must_use]
pub fn get_many<'a>(json: &'a str, paths: &[&str]) -> Vec<Value<'a>> {
    paths.iter().map(|path| get(json, path)).collect()
}

/// Look up a path that must be present
///
/// # Errors
///
/// Returns [`BealachError::NotFound`] when nothing matches.
pub fn require<'a>(json: &'a str, path: &str) -> Result<Value<'a>> {
    let value = get(json, path);
    if value.exists() {
        Ok(value)
    } else {
        Err(BealachError::NotFound {
            path: path.to_string(),
        })
    }
}

/// Classify a whole document as a value
///
/// Unlike `get(json, "")`, the result coerces normally through
/// [`Value::scalar`].
#[must_use]
pub fn parse(json: &str) -> Value<'_> {
    parse_bytes(json.as_bytes())
}

/// Classify a whole document given as bytes
#[must_use]
pub fn parse_bytes(json: &[u8]) -> Value<'_> {
    matcher::resolve(json, &ParsedPath::default())
}
