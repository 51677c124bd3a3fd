#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fuzz target for lookup correctness against serde_json.
//!
//! For every document serde_json accepts, each top-level member and each
//! array position must resolve to the same scalar. Duplicate keys resolve
//! to the last occurrence in both.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_serde_agreement

use bealach::{Kind, get};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && key != "#" && !key.contains(['.', '*', '?', '\\'])
}

fn check(found: &bealach::Value<'_>, expected: &Value) {
    assert!(found.exists());
    match expected {
        Value::Null => assert_eq!(found.kind(), Kind::Null),
        Value::Bool(b) => assert_eq!(found.as_bool(), Some(*b)),
        Value::Number(_) => assert_eq!(found.kind(), Kind::Number),
        Value::String(s) => assert_eq!(found.str(), s.as_str()),
        Value::Array(_) | Value::Object(_) => assert_eq!(found.kind(), Kind::Json),
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = serde_json::from_str::<Value>(text) else {
        return;
    };

    match &doc {
        Value::Object(map) => {
            assert_eq!(get(text, "#").kind(), Kind::Number);
            for (key, expected) in map {
                if is_plain_key(key) {
                    check(&get(text, key), expected);
                }
            }
        }
        Value::Array(items) => {
            assert_eq!(get(text, "#").as_i64(), Some(items.len() as i64));
            for (i, expected) in items.iter().enumerate() {
                check(&get(text, &i.to_string()), expected);
            }
        }
        _ => {}
    }
});
