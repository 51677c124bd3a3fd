#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz target for path lookup over arbitrary document bytes.
//!
//! The first input byte selects how many of the following bytes form the
//! path; the rest is the document. Lookups must never panic, and a borrowed
//! match must lie inside the document.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_get

use bealach::{Kind, get_bytes, parse_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (path, doc) = rest.split_at(split);
    let path = String::from_utf8_lossy(path);

    let value = get_bytes(doc, &path);
    if value.exists() && !path.ends_with('#') {
        assert!(value.raw().len() <= doc.len());
    }
    if !value.exists() {
        assert_eq!(value.kind(), Kind::Null);
        assert!(value.raw().is_empty());
    }

    let _ = value.to_string();
    let _ = value.scalar();
    let _ = value.num();
    for (key, member) in value.iter() {
        let _ = key.map(|k| k.str().into_owned());
        let _ = member.get(&path);
    }

    let whole = parse_bytes(doc);
    assert!(!whole.less(&whole, true));
    let _ = whole.compare(&value, false);
});
