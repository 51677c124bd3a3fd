// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dot-path parsing
//!
//! A path such as `users.0.name` is split on unescaped `.` into an ordered
//! list of [`Segment`]s. `\.`, `\*` and `\?` make the following character a
//! literal; any other backslash is kept as written. A segment containing an
//! unescaped `*` or `?` becomes a [`Pattern`], and a segment of exactly `#`
//! becomes [`Segment::Count`].
//!
//! Parsing never fails and never touches a document.

use smallvec::SmallVec;
use std::borrow::Cow;

/// Path bytes that a backslash turns into literals
const fn is_path_meta(byte: u8) -> bool {
    matches!(byte, b'.' | b'*' | b'?')
}

/// One component of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'p> {
    /// Exact object key, with path escapes resolved
    Key {
        /// Key text
        name: Cow<'p, str>,
        /// Array position, when `name` is a canonical decimal integer
        index: Option<usize>,
    },
    /// Key pattern with `*` and `?` wildcards
    Wildcard(Pattern),
    /// The `#` pseudo-segment
    Count,
}

impl<'p> Segment<'p> {
    fn from_raw(raw: &'p str, escaped: bool, wild: bool) -> Self {
        if wild {
            return Self::Wildcard(Pattern::compile(raw));
        }
        if raw == "#" {
            return Self::Count;
        }
        let name = if escaped {
            Cow::Owned(resolve_escapes(raw))
        } else {
            Cow::Borrowed(raw)
        };
        let index = parse_index(&name);
        Self::Key { name, index }
    }

    /// Whether an object key (already unescaped) satisfies this segment
    ///
    /// `Count` matches a key spelled `#`, which is how a non-final `#`
    /// behaves inside objects.
    #[must_use]
    pub fn matches_key(&self, key: &[u8]) -> bool {
        match self {
            Self::Key { name, .. } => name.as_bytes() == key,
            Self::Wildcard(pattern) => pattern.matches(key),
            Self::Count => key == b"#",
        }
    }
}

/// Parse a canonical non-negative decimal integer (no sign, no leading zeros)
fn parse_index(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    name.parse().ok()
}

fn resolve_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match after.as_bytes().first() {
            Some(&b) if is_path_meta(b) => {
                out.push(char::from(b));
                rest = &after[1..];
            }
            _ => {
                out.push('\\');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// A parsed dot-path
///
/// Segments borrow from the path text unless escapes had to be resolved.
/// Paths of up to eight segments are stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath<'p> {
    segments: SmallVec<[Segment<'p>; 8]>,
}

impl<'p> ParsedPath<'p> {
    /// Parse a dot-path into segments
    ///
    /// Empty segments (from `a..b` or a leading/trailing `.`) are dropped,
    /// so the empty path and `.` both yield zero segments.
    #[must_use]
    pub fn parse(path: &'p str) -> Self {
        let bytes = path.as_bytes();
        let mut segments = SmallVec::new();
        let mut start = 0;
        let mut escaped = false;
        let mut wild = false;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' if bytes.get(i + 1).is_some_and(|&b| is_path_meta(b)) => {
                    escaped = true;
                    i += 2;
                    continue;
                }
                b'.' => {
                    push_segment(&mut segments, &path[start..i], escaped, wild);
                    start = i + 1;
                    escaped = false;
                    wild = false;
                }
                b'*' | b'?' => wild = true,
                _ => {}
            }
            i += 1;
        }
        push_segment(&mut segments, &path[start..], escaped, wild);

        Self { segments }
    }

    /// The parsed segments in path order
    #[must_use]
    pub fn segments(&self) -> &[Segment<'p>] {
        &self.segments
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the whole-document path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn push_segment<'p>(
    segments: &mut SmallVec<[Segment<'p>; 8]>,
    raw: &'p str,
    escaped: bool,
    wild: bool,
) {
    if !raw.is_empty() {
        segments.push(Segment::from_raw(raw, escaped, wild));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glob {
    Byte(u8),
    /// `?`: one UTF-8 character (one byte if the input is not valid UTF-8)
    One,
    /// `*`: any run, including empty
    Any,
}

/// A compiled key pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Glob>,
}

impl Pattern {
    /// Compile a raw path segment into a pattern
    ///
    /// `\*`, `\?` and `\.` are literals; consecutive `*` collapse.
    #[must_use]
    pub fn compile(raw: &str) -> Self {
        let bytes = raw.as_bytes();
        let mut tokens = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            match b {
                b'\\' if bytes.get(i + 1).is_some_and(|&n| is_path_meta(n)) => {
                    tokens.push(Glob::Byte(bytes[i + 1]));
                    i += 1;
                }
                b'*' => {
                    if tokens.last() != Some(&Glob::Any) {
                        tokens.push(Glob::Any);
                    }
                }
                b'?' => tokens.push(Glob::One),
                _ => tokens.push(Glob::Byte(b)),
            }
            i += 1;
        }
        Self { tokens }
    }

    /// Match the pattern against the whole of `text`
    ///
    /// Single-star backtracking: the last `*` seen absorbs one more character
    /// on each mismatch, so matching is iterative and never recurses.
    #[must_use]
    pub fn matches(&self, text: &[u8]) -> bool {
        let tokens = &self.tokens;
        let mut p = 0;
        let mut t = 0;
        let mut star: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(Glob::Any) => {
                    star = Some((p, t));
                    p += 1;
                    continue;
                }
                Some(Glob::One) => {
                    t += char_width(text, t);
                    p += 1;
                    continue;
                }
                Some(&Glob::Byte(b)) if text[t] == b => {
                    t += 1;
                    p += 1;
                    continue;
                }
                _ => {}
            }
            match star {
                Some((sp, st)) => {
                    let next = st + char_width(text, st);
                    star = Some((sp, next));
                    p = sp + 1;
                    t = next;
                }
                None => return false,
            }
        }

        tokens[p.min(tokens.len())..]
            .iter()
            .all(|g| *g == Glob::Any)
    }
}

/// Width of the UTF-8 sequence starting at `at`, clamped to the input
fn char_width(text: &[u8], at: usize) -> usize {
    let width = match text[at] {
        0xF0..=0xF7 => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    };
    width.min(text.len() - at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(name: &str) -> Segment<'_> {
        Segment::Key {
            name: Cow::Borrowed(name),
            index: parse_index(name),
        }
    }

    #[test]
    fn test_parse_simple() {
        let path = ParsedPath::parse("widget.window.name");
        assert_eq!(
            path.segments(),
            &[key("widget"), key("window"), key("name")]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(ParsedPath::parse("").is_empty());
        assert!(ParsedPath::parse(".").is_empty());
        assert_eq!(ParsedPath::parse("a..b").len(), 2);
    }

    #[test]
    fn test_parse_index() {
        let path = ParsedPath::parse("items.3.07.0");
        let indices: Vec<_> = path
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Key { index, .. } => *index,
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![None, Some(3), None, Some(0)]);
    }

    #[test]
    fn test_parse_count() {
        let path = ParsedPath::parse("items.#");
        assert_eq!(path.segments()[1], Segment::Count);
        assert!(matches!(
            ParsedPath::parse("#x").segments()[0],
            Segment::Key { .. }
        ));
    }

    #[test]
    fn test_parse_escapes() {
        let path = ParsedPath::parse(r"test.key\.v.keyk\*.key\?");
        let names: Vec<_> = path
            .segments()
            .iter()
            .map(|s| match s {
                Segment::Key { name, .. } => name.to_string(),
                other => panic!("unexpected segment {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["test", "key.v", "keyk*", "key?"]);
    }

    #[test]
    fn test_parse_backslash_kept_literal() {
        let path = ParsedPath::parse(r"a\b.c\");
        assert_eq!(path.segments(), &[key(r"a\b"), key(r"c\")]);
    }

    #[test]
    fn test_parse_wildcard() {
        let path = ParsedPath::parse("user.na*.f?rst");
        assert!(matches!(path.segments()[1], Segment::Wildcard(_)));
        assert!(matches!(path.segments()[2], Segment::Wildcard(_)));
    }

    #[test]
    fn test_pattern_star() {
        let p = Pattern::compile("na*");
        assert!(p.matches(b"name"));
        assert!(p.matches(b"na"));
        assert!(!p.matches(b"nb"));
        assert!(Pattern::compile("*").matches(b""));
        assert!(Pattern::compile("a*b*c").matches(b"axxbyyc"));
        assert!(!Pattern::compile("a*b*c").matches(b"axxbyy"));
        assert!(Pattern::compile("*ab").matches(b"aab"));
    }

    #[test]
    fn test_pattern_question() {
        let p = Pattern::compile("f?rst");
        assert!(p.matches(b"first"));
        assert!(!p.matches(b"frst"));
        assert!(Pattern::compile("?").matches("é".as_bytes()));
        assert!(!Pattern::compile("?").matches(b"ab"));
    }

    #[test]
    fn test_pattern_escaped_meta() {
        let p = Pattern::compile(r"key\*v*");
        assert!(p.matches(b"key*v"));
        assert!(p.matches(b"key*vzz"));
        assert!(!p.matches(b"keyzv"));
    }

    #[test]
    fn test_matches_key() {
        assert!(key("a").matches_key(b"a"));
        assert!(!key("a").matches_key(b"ab"));
        assert!(Segment::Count.matches_key(b"#"));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(path in ".{0,64}") {
            let parsed = ParsedPath::parse(&path);
            prop_assert!(parsed.len() <= path.len());
        }

        #[test]
        fn prop_plain_paths_split_on_dots(parts in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
            let joined = parts.join(".");
            let parsed = ParsedPath::parse(&joined);
            prop_assert_eq!(parsed.len(), parts.len());
            for (segment, part) in parsed.segments().iter().zip(&parts) {
                prop_assert!(segment.matches_key(part.as_bytes()));
            }
        }

        #[test]
        fn prop_pattern_star_matches_everything(text in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert!(Pattern::compile("*").matches(&text));
        }
    }
}
