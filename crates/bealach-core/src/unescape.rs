// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON string unescaping
//!
//! Decodes the body of a JSON string (the bytes between the quotes). A
//! malformed or truncated escape ends decoding: the bytes decoded so far are
//! returned and the rest of the input is dropped. Unpaired surrogates decode
//! to U+FFFD.

use memchr::memchr;
use std::borrow::Cow;

const REPLACEMENT: char = '\u{FFFD}';

/// Unescape a JSON string body
#[must_use]
pub fn unescape(raw: &str) -> String {
    match String::from_utf8(unescape_bytes(raw.as_bytes())) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Unescape only when the body contains a backslash
#[must_use]
pub fn unescape_if_needed(raw: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b'\\', raw).is_some() {
        Cow::Owned(unescape_bytes(raw))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Unescape a JSON string body given as bytes
///
/// Bytes outside escapes are copied as they are, so invalid UTF-8 in the
/// input stays invalid in the output.
#[must_use]
pub fn unescape_bytes(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let Some(off) = memchr(b'\\', &raw[i..]) else {
            out.extend_from_slice(&raw[i..]);
            break;
        };
        out.extend_from_slice(&raw[i..i + off]);
        i += off + 1;

        let Some(&escape) = raw.get(i) else {
            break;
        };
        i += 1;

        let byte = match escape {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let Some(ch) = decode_unicode(raw, &mut i) else {
                    break;
                };
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                continue;
            }
            _ => break,
        };
        out.push(byte);
    }

    out
}

fn hex4(raw: &[u8], at: usize) -> Option<u16> {
    let digits = raw.get(at..at + 4)?;
    let mut value = 0u16;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => return None,
        };
        value = (value << 4) | u16::from(nibble);
    }
    Some(value)
}

/// Decode the hex group after `\u` at `*at`, pairing surrogates
fn decode_unicode(raw: &[u8], at: &mut usize) -> Option<char> {
    let high = hex4(raw, *at)?;
    *at += 4;

    match high {
        0xD800..=0xDBFF => {
            if raw.get(*at..*at + 2) == Some(b"\\u".as_slice())
                && let Some(low) = hex4(raw, *at + 2)
                && (0xDC00..=0xDFFF).contains(&low)
            {
                *at += 6;
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                Some(char::from_u32(code).unwrap_or(REPLACEMENT))
            } else {
                Some(REPLACEMENT)
            }
        }
        0xDC00..=0xDFFF => Some(REPLACEMENT),
        _ => Some(char::from_u32(u32::from(high)).unwrap_or(REPLACEMENT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unescape(r#"a\"b\\c\/d"#), "a\"b\\c/d");
        assert_eq!(unescape(r"\b\f\n\r\t"), "\u{8}\u{c}\n\r\t");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(unescape(r"\u0041\u00e9"), "Aé");
        assert_eq!(unescape(r"\ud83d\ude00"), "😀");
        assert_eq!(unescape(r"\uD83D\uDE00!"), "😀!");
    }

    #[test]
    fn test_unpaired_surrogates() {
        assert_eq!(unescape(r"\uD83Dx"), "\u{FFFD}x");
        assert_eq!(unescape(r"\uDE00"), "\u{FFFD}");
        assert_eq!(unescape(r"\uD83D\u0041"), "\u{FFFD}A");
    }

    #[test]
    fn test_malformed_stops_early() {
        assert_eq!(unescape("ab\\"), "ab");
        assert_eq!(unescape(r"ab\u12"), "ab");
        assert_eq!(unescape(r"ab\uzzzzcd"), "ab");
        assert_eq!(unescape(r"ab\qcd"), "ab");
    }

    #[test]
    fn test_odd_inputs_do_not_panic() {
        assert_eq!(unescape_bytes(&[b'\\', b'\\', 0]), vec![b'\\', 0]);
        assert_eq!(unescape_bytes(b"\\/\\b\\f"), vec![b'/', 0x08, 0x0C]);
        assert_eq!(unescape_bytes(&[0xFF, b'\\', b'n', 0xFE]), vec![0xFF, b'\n', 0xFE]);
    }

    #[test]
    fn test_unescape_if_needed_borrows() {
        assert!(matches!(unescape_if_needed(b"plain"), Cow::Borrowed(_)));
        assert!(matches!(unescape_if_needed(b"a\\nb"), Cow::Owned(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10_000))]

        #[test]
        fn prop_round_trips_serde_encoding(text in any::<String>()) {
            let encoded = serde_json::to_string(&text).unwrap();
            let body = &encoded[1..encoded.len() - 1];
            prop_assert_eq!(unescape(body), text);
        }

        #[test]
        fn prop_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..64)) {
            let out = unescape_bytes(&raw);
            prop_assert!(out.len() <= raw.len());
        }
    }
}
