// SPDX-License-Identifier: MIT OR Apache-2.0
//! Structural scanning
//!
//! Classifies a JSON value from its first byte and finds where it ends without
//! decoding it. Strings are skipped with `memchr2` over quotes and
//! backslashes; objects and arrays are skipped iteratively with a depth
//! counter, so document nesting never grows the call stack.
//!
//! Every advance is bounds-checked. A value that runs off the end of the
//! buffer ends at the buffer end and is reported as not closed.
//!
//! The scanner does not validate: `tru3` passes as `true` and mismatched
//! brackets only affect depth.

use crate::kind::Kind;
use memchr::memchr2;

/// A classified value span within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Kind decided by the first byte
    pub kind: Kind,
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
    /// False when the buffer ended before the value did
    pub closed: bool,
}

impl Token {
    /// The bytes covered by the token
    #[must_use]
    pub fn bytes<'d>(&self, doc: &'d [u8]) -> &'d [u8] {
        &doc[self.start..self.end]
    }
}

/// JSON insignificant whitespace
#[inline]
#[must_use]
pub const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Offset of the first non-whitespace byte at or after `pos`
#[inline]
#[must_use]
pub fn skip_whitespace(doc: &[u8], mut pos: usize) -> usize {
    while pos < doc.len() && is_whitespace(doc[pos]) {
        pos += 1;
    }
    pos
}

/// Classify the value starting at `pos` and find its end
///
/// Returns `None` when `pos` is past the buffer or the byte there cannot start
/// a value.
#[must_use]
pub fn classify_and_skip(doc: &[u8], pos: usize) -> Option<Token> {
    let kind = Kind::from_lead_byte(*doc.get(pos)?)?;
    let (end, closed) = match kind {
        Kind::String => skip_string(doc, pos),
        Kind::Number => (skip_number(doc, pos), true),
        Kind::Json => skip_container(doc, pos),
        Kind::True | Kind::Null => skip_literal(doc, pos, 4),
        Kind::False => skip_literal(doc, pos, 5),
    };
    Some(Token {
        kind,
        start: pos,
        end,
        closed,
    })
}

/// Skip a string whose opening quote is at `pos`
///
/// A backslash consumes exactly the byte after it. Returns the offset past
/// the closing quote and whether one was found.
#[must_use]
pub fn skip_string(doc: &[u8], pos: usize) -> (usize, bool) {
    let mut i = pos + 1;
    while i < doc.len() {
        let Some(off) = memchr2(b'"', b'\\', &doc[i..]) else {
            break;
        };
        let at = i + off;
        if doc[at] == b'"' {
            return (at + 1, true);
        }
        i = at + 2;
    }
    (doc.len(), false)
}

fn skip_digits(doc: &[u8], mut pos: usize) -> usize {
    while pos < doc.len() && doc[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Skip a number starting at `pos`
///
/// Consumes `-? digits (. digits)? ([eE] [+-]? digits)?` and stops at the
/// first byte that cannot extend it.
#[must_use]
pub fn skip_number(doc: &[u8], pos: usize) -> usize {
    let mut i = pos;
    if doc.get(i) == Some(&b'-') {
        i += 1;
    }
    i = skip_digits(doc, i);
    if doc.get(i) == Some(&b'.') {
        i = skip_digits(doc, i + 1);
    }
    if matches!(doc.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(doc.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        i = skip_digits(doc, i);
    }
    i
}

/// Skip a fixed-width literal; spelling is not checked
fn skip_literal(doc: &[u8], pos: usize, width: usize) -> (usize, bool) {
    let end = pos + width;
    if end <= doc.len() {
        (end, true)
    } else {
        (doc.len(), false)
    }
}

/// Skip an object or array whose opening bracket is at `pos`
///
/// Returns the offset past the bracket that brings the depth back to zero,
/// and whether it was found before the buffer ended.
#[must_use]
pub fn skip_container(doc: &[u8], pos: usize) -> (usize, bool) {
    let mut depth = 0usize;
    let mut i = pos;
    while i < doc.len() {
        match doc[i] {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (i + 1, true);
                }
            }
            b'"' => {
                let (end, closed) = skip_string(doc, i);
                if !closed {
                    break;
                }
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    (doc.len(), false)
}

/// One step of a [`MemberCursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// An entry whose value starts at `value`
    Entry {
        /// Key string token, quotes included; `None` inside arrays
        key: Option<Token>,
        /// Offset of the value's first byte
        value: usize,
    },
    /// The closing bracket was reached; `end` is the offset past it
    End {
        /// Offset past the closing bracket
        end: usize,
    },
    /// Expected structure was missing
    Malformed,
}

/// Walks the immediate members of one object or array
///
/// The cursor only finds where each value starts. The caller consumes the
/// value (by skipping or descending into it) and reports its end through
/// [`MemberCursor::resume_at`] before asking for the next member.
#[derive(Debug, Clone)]
pub struct MemberCursor<'d> {
    doc: &'d [u8],
    pos: usize,
    object: bool,
    first: bool,
}

impl<'d> MemberCursor<'d> {
    /// Open a cursor on the container starting at `pos`
    ///
    /// Returns `None` unless the byte at `pos` is `{` or `[`.
    #[must_use]
    pub fn open(doc: &'d [u8], pos: usize) -> Option<Self> {
        let object = match doc.get(pos)? {
            b'{' => true,
            b'[' => false,
            _ => return None,
        };
        Some(Self {
            doc,
            pos: pos + 1,
            object,
            first: true,
        })
    }

    /// True when walking an object
    #[must_use]
    pub const fn is_object(&self) -> bool {
        self.object
    }

    /// Continue after a value that ended at `end`
    pub const fn resume_at(&mut self, end: usize) {
        self.pos = end;
    }

    /// Advance to the next member
    pub fn next_member(&mut self) -> Member {
        let doc = self.doc;
        let close = if self.object { b'}' } else { b']' };

        let mut i = skip_whitespace(doc, self.pos);
        match doc.get(i) {
            None => return Member::Malformed,
            Some(&b) if b == close => return Member::End { end: i + 1 },
            Some(b',') if !self.first => {
                i = skip_whitespace(doc, i + 1);
                // tolerate a trailing comma
                if doc.get(i) == Some(&close) {
                    return Member::End { end: i + 1 };
                }
            }
            Some(_) if !self.first => return Member::Malformed,
            Some(_) => {}
        }
        self.first = false;

        let key = if self.object {
            if doc.get(i) != Some(&b'"') {
                return Member::Malformed;
            }
            let (end, closed) = skip_string(doc, i);
            if !closed {
                return Member::Malformed;
            }
            let key = Token {
                kind: Kind::String,
                start: i,
                end,
                closed,
            };
            i = skip_whitespace(doc, end);
            if doc.get(i) != Some(&b':') {
                return Member::Malformed;
            }
            i = skip_whitespace(doc, i + 1);
            Some(key)
        } else {
            None
        };

        if i >= doc.len() {
            return Member::Malformed;
        }
        self.pos = i;
        Member::Entry { key, value: i }
    }

    /// Skip the value of the current entry structurally
    ///
    /// Returns `false` when the value is unclassifiable or unterminated.
    pub fn skip_value(&mut self, value: usize) -> bool {
        match classify_and_skip(self.doc, value) {
            Some(token) if token.closed => {
                self.pos = token.end;
                true
            }
            _ => false,
        }
    }
}

/// Count the immediate members of the container at `pos`
///
/// Returns the count and the offset past the container, or `None` when the
/// value is not a container or its structure could not be followed.
#[must_use]
pub fn count_members(doc: &[u8], pos: usize) -> Option<(usize, usize)> {
    let mut cursor = MemberCursor::open(doc, pos)?;
    let mut count = 0;
    loop {
        match cursor.next_member() {
            Member::Entry { value, .. } => {
                if !cursor.skip_value(value) {
                    return None;
                }
                count += 1;
            }
            Member::End { end } => return Some((count, end)),
            Member::Malformed => return None,
        }
    }
}
