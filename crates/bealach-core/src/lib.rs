// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types and scanning primitives for bealach
//!
//! This crate provides the pieces the query engine is built from:
//!
//! - [`error`] - Error types and Result alias
//! - [`kind`] - The kind tag of a matched value
//! - [`path`] - Dot-path parsing into segments and wildcard patterns
//! - [`scan`] - Structural scanning that skips values without decoding them
//! - [`unescape`] - JSON string unescaping

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Error types for bealach operations
pub mod error;
/// Kind tag for matched values
pub mod kind;
/// Dot-path parsing
pub mod path;
/// Structural JSON scanning
pub mod scan;
/// JSON string unescaping
pub mod unescape;

// Re-exports for convenience
pub use error::{BealachError, Result};
pub use kind::Kind;
pub use path::{ParsedPath, Pattern, Segment};
pub use scan::{Member, MemberCursor, Token, classify_and_skip, count_members, skip_whitespace};
pub use unescape::{unescape, unescape_bytes, unescape_if_needed};
