// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path matching over raw document bytes
//!
//! The matcher consumes one segment per level of descent. Everything it does
//! not descend into is skipped with the structural scanner, so recursion depth
//! is bounded by the number of path segments, never by document nesting.
//!
//! Objects are scanned to the end even after a key matches. A later member
//! whose key matches and whose remaining path resolves replaces the earlier
//! result; a later member that fails to resolve leaves it in place. Arrays
//! return the first position that matches and resolves.

use crate::value::Value;
use bealach_core::{
    Member, MemberCursor, ParsedPath, Segment, Token, classify_and_skip, count_members,
    skip_whitespace, unescape_if_needed,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Found {
    Token(Token),
    Count(usize),
}

/// Outcome of matching at one value: what was found, and where the value ends
#[derive(Debug, Clone, Copy)]
struct Walk {
    found: Option<Found>,
    end: usize,
}

impl Walk {
    const fn miss(end: usize) -> Self {
        Self { found: None, end }
    }
}

/// Resolve a parsed path against a document
pub(crate) fn resolve<'a>(doc: &'a [u8], path: &ParsedPath<'_>) -> Value<'a> {
    let start = skip_whitespace(doc, 0);
    match match_value(doc, start, path.segments()).found {
        Some(Found::Token(token)) => Value::from_token(doc, token),
        Some(Found::Count(n)) => Value::count(n),
        None => Value::missing(),
    }
}

/// Offset past the value at `pos`, or the buffer end when it cannot be skipped
fn skip_end(doc: &[u8], pos: usize) -> usize {
    classify_and_skip(doc, pos).map_or(doc.len(), |token| token.end)
}

fn match_value(doc: &[u8], pos: usize, segments: &[Segment<'_>]) -> Walk {
    let Some((head, rest)) = segments.split_first() else {
        return match classify_and_skip(doc, pos) {
            Some(token) if token.closed => Walk {
                found: Some(Found::Token(token)),
                end: token.end,
            },
            Some(token) => Walk::miss(token.end),
            None => Walk::miss(doc.len()),
        };
    };

    if matches!(head, Segment::Count) && rest.is_empty() {
        return match count_members(doc, pos) {
            Some((n, end)) => Walk {
                found: Some(Found::Count(n)),
                end,
            },
            None => Walk::miss(skip_end(doc, pos)),
        };
    }

    match doc.get(pos) {
        Some(b'{') => match_object(doc, pos, head, rest),
        Some(b'[') => match_array(doc, pos, head, rest),
        _ => Walk::miss(skip_end(doc, pos)),
    }
}

/// Give up on a container whose structure could not be followed
fn degrade(doc: &[u8], pos: usize, found: Option<Found>) -> Walk {
    debug!(offset = pos, "unexpected structure in container, skipping it");
    Walk {
        found,
        end: skip_end(doc, pos),
    }
}

fn match_object(doc: &[u8], pos: usize, head: &Segment<'_>, rest: &[Segment<'_>]) -> Walk {
    let Some(mut cursor) = MemberCursor::open(doc, pos) else {
        return Walk::miss(skip_end(doc, pos));
    };
    let mut best = None;

    loop {
        match cursor.next_member() {
            Member::Entry {
                key: Some(key),
                value,
            } => {
                let body = &doc[key.start + 1..key.end - 1];
                if head.matches_key(&unescape_if_needed(body)) {
                    let walk = match_value(doc, value, rest);
                    if walk.found.is_some() {
                        best = walk.found;
                    }
                    cursor.resume_at(walk.end);
                } else if !cursor.skip_value(value) {
                    return degrade(doc, pos, best);
                }
            }
            Member::End { end } => return Walk { found: best, end },
            Member::Entry { key: None, .. } | Member::Malformed => {
                return degrade(doc, pos, best);
            }
        }
    }
}

fn matches_index(head: &Segment<'_>, index: usize) -> bool {
    match head {
        Segment::Key { index: target, .. } => *target == Some(index),
        Segment::Wildcard(pattern) => {
            let mut buf = itoa::Buffer::new();
            pattern.matches(buf.format(index).as_bytes())
        }
        Segment::Count => false,
    }
}

fn match_array(doc: &[u8], pos: usize, head: &Segment<'_>, rest: &[Segment<'_>]) -> Walk {
    // a key that is not a position can never match inside an array
    if let Segment::Key { index: None, .. } | Segment::Count = head {
        return Walk::miss(skip_end(doc, pos));
    }
    let Some(mut cursor) = MemberCursor::open(doc, pos) else {
        return Walk::miss(skip_end(doc, pos));
    };

    let mut index = 0usize;
    loop {
        match cursor.next_member() {
            Member::Entry { value, .. } => {
                if matches_index(head, index) {
                    let walk = match_value(doc, value, rest);
                    if walk.found.is_some() {
                        cursor.resume_at(walk.end);
                        return Walk {
                            found: walk.found,
                            end: drain(doc, pos, &mut cursor),
                        };
                    }
                    cursor.resume_at(walk.end);
                } else if !cursor.skip_value(value) {
                    return degrade(doc, pos, None);
                }
                index += 1;
            }
            Member::End { end } => return Walk::miss(end),
            Member::Malformed => return degrade(doc, pos, None),
        }
    }
}

/// Skip the remaining members of a container, returning its end
fn drain(doc: &[u8], pos: usize, cursor: &mut MemberCursor<'_>) -> usize {
    loop {
        match cursor.next_member() {
            Member::Entry { value, .. } => {
                if !cursor.skip_value(value) {
                    return skip_end(doc, pos);
                }
            }
            Member::End { end } => return end,
            Member::Malformed => return skip_end(doc, pos),
        }
    }
}
