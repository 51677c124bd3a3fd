#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz target for path parsing and key patterns.
//!
//! Checks segment counts against the number of unescaped dots and that
//! wildcard patterns behave on arbitrary keys.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_path

use bealach_core::{ParsedPath, Pattern, Segment};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = ParsedPath::parse(input);
    let dots = input.matches('.').count();
    assert!(parsed.len() <= dots + 1, "too many segments for {input:?}");

    for segment in parsed.segments() {
        match segment {
            Segment::Key { name, index } => {
                assert!(!name.is_empty());
                assert!(segment.matches_key(name.as_bytes()));
                if let Some(i) = index {
                    assert_eq!(i.to_string(), name.as_ref());
                }
            }
            Segment::Wildcard(pattern) => {
                let _ = pattern.matches(data);
                let _ = pattern.matches(b"");
            }
            Segment::Count => assert!(segment.matches_key(b"#")),
        }
    }

    assert!(Pattern::compile("*").matches(data));
    let pattern = Pattern::compile(input);
    let _ = pattern.matches(data);
});
