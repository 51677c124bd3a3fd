// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conformance tests for path queries against fixed documents

#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use bealach::{BealachError, Kind, Scalar, get, get_many, parse, require};

// poorly formed on purpose: `vals` holds an unquoted token
const BASIC_JSON: &str = r#"{"age":100, "name":{"here":"B\\\"R"},
	"noop":{"what is a wren?":"a bird"},
	"happy":true,"immortal":false,
	"items":[1,2,3,{"tags":[1,2,3],"points":[[1,2],[3,4]]},4,5,6,7],
	"arr":["1",2,"3",{"hello":"world"},"4",5],
	"vals":[1,2,3,{"sadf":sdf"asdf"}],"name":{"first":"tom","last":null}}"#;

const WIDGET_JSON: &str = r#"
{"widget": {
    "debug": "on",
    "window": {
        "title": "Sample Konfabulator Widget",
        "name": "main_window",
        "width": 500,
        "height": 500
    },
    "image": {
        "src": "Images/Sun.png",
        "hOffset": 250,
        "vOffset": 250,
        "alignment": "center"
    },
    "text": {
        "data": "Click Here",
        "size": 36,
        "style": "bold",
        "vOffset": 100,
        "alignment": "center",
        "onMouseUp": "sun1.opacity = (sun1.opacity / 100) * 90;"
    }
}}
"#;

const ESCAPE_JSON: &str = r#"{
    "test":{
        "*":"valZ",
        "*v":"val0",
        "keyv*":"val1",
        "key*v":"val2",
        "keyv?":"val3",
        "key?v":"val4",
        "keyv.":"val5",
        "key.v":"val6",
        "keyk*":{"key?":"val7"}
    }
}"#;

#[test]
fn test_escaped_path_literals() {
    let cases = [
        (r"test.\*", "valZ"),
        (r"test.\*v", "val0"),
        (r"test.keyv\*", "val1"),
        (r"test.key\*v", "val2"),
        (r"test.keyv\?", "val3"),
        (r"test.key\?v", "val4"),
        (r"test.keyv\.", "val5"),
        (r"test.key\.v", "val6"),
        (r"test.keyk\*.key\?", "val7"),
    ];
    for (path, expected) in cases {
        assert_eq!(get(ESCAPE_JSON, path).to_string(), expected, "path {path}");
    }
}

#[test]
fn test_counts() {
    assert_eq!(get(BASIC_JSON, "items.#").num(), 8.0);
    assert_eq!(get(BASIC_JSON, "items.3.tags.#").num(), 3.0);
    assert_eq!(get(BASIC_JSON, "items.3.points.1.#").num(), 2.0);
    assert_eq!(get(BASIC_JSON, "vals.#").num(), 4.0);
    assert_eq!(get(BASIC_JSON, "arr.#").to_string(), "6");
    assert_eq!(get(BASIC_JSON, "items.#").kind(), Kind::Number);
}

#[test]
fn test_duplicate_keys() {
    let here = get(BASIC_JSON, "name.here");
    assert_eq!(here.to_string(), "B\\\"R");

    let first = get(BASIC_JSON, "name.first");
    assert_eq!(first.to_string(), "tom");
    assert!(matches!(first.scalar(), Scalar::Text(_)));

    let last = get(BASIC_JSON, "name.last");
    assert!(last.exists());
    assert_eq!(last.kind(), Kind::Null);
    assert_eq!(last.to_string(), "null");
    assert_eq!(last.scalar(), Scalar::Null);
}

#[test]
fn test_scalars() {
    let age = get(BASIC_JSON, "age");
    assert_eq!(age.to_string(), "100");
    assert_eq!(age.scalar(), Scalar::Number(100.0));

    let happy = get(BASIC_JSON, "happy");
    assert_eq!(happy.to_string(), "true");
    assert_eq!(happy.scalar(), Scalar::Bool(true));

    let immortal = get(BASIC_JSON, "immortal");
    assert_eq!(immortal.to_string(), "false");
    assert_eq!(immortal.scalar(), Scalar::Bool(false));

    let hello = get(BASIC_JSON, "arr.3.hello");
    assert_eq!(hello.to_string(), "world");
    assert!(hello.scalar().as_str().is_some());
}

#[test]
fn test_composite_value_stays_raw() {
    let noop = get(BASIC_JSON, "noop");
    let raw = r#"{"what is a wren?":"a bird"}"#;
    assert_eq!(noop.kind(), Kind::Json);
    assert_eq!(noop.to_string(), raw);
    assert_eq!(noop.raw(), raw.as_bytes());
    assert_eq!(noop.scalar().as_str(), Some(raw));
    assert_eq!(noop.get("what is a wren?").to_string(), "a bird");
}

#[test]
fn test_empty_path() {
    let whole = get(BASIC_JSON, "");
    assert!(whole.exists());
    assert_eq!(whole.kind(), Kind::Json);
    assert_eq!(whole.scalar(), Scalar::Null);

    assert_eq!(get("42", "").scalar(), Scalar::Null);
    assert_eq!(get("\"text\"", "").scalar(), Scalar::Null);
    assert!(!get("", "").exists());
    assert!(!get("   ", "").exists());

    assert_eq!(parse("42").scalar(), Scalar::Number(42.0));
}

#[test]
fn test_missing_paths() {
    assert!(!get(BASIC_JSON, "vals.hello").exists());
    assert!(!get(BASIC_JSON, "nope").exists());
    assert!(!get(BASIC_JSON, "items.8").exists());
    assert!(!get(BASIC_JSON, "age.#").exists());
    assert_eq!(get(BASIC_JSON, "nope").to_string(), "");
}

#[test]
fn test_widget_paths() {
    assert_eq!(get(WIDGET_JSON, "widget.window.name").to_string(), "main_window");
    assert_eq!(get(WIDGET_JSON, "widget.image.hOffset").num(), 250.0);
    assert_eq!(
        get(WIDGET_JSON, "widget.text.onMouseUp").to_string(),
        "sun1.opacity = (sun1.opacity / 100) * 90;"
    );
    assert_eq!(get(WIDGET_JSON, "widget.#").to_string(), "4");
    assert_eq!(get(WIDGET_JSON, "widget.*.vOffset").to_string(), "100");
}

#[test]
fn test_get_many() {
    let values = get_many(WIDGET_JSON, &["widget.debug", "widget.window.width", "widget.x"]);
    assert_eq!(values.len(), 3);
    assert_eq!(values[0].to_string(), "on");
    assert_eq!(values[1].as_i64(), Some(500));
    assert!(!values[2].exists());
}

#[test]
fn test_require() {
    assert_eq!(require(WIDGET_JSON, "widget.debug").unwrap().to_string(), "on");
    assert_eq!(
        require(WIDGET_JSON, "widget.missing").unwrap_err(),
        BealachError::NotFound {
            path: "widget.missing".to_string(),
        }
    );
}

fn string_value(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}

#[test]
fn test_less() {
    let null = parse("null");
    let fals = parse("false");
    let tru = parse("true");
    let json = parse("{}");
    let num = parse("1");
    let string = parse("\"a\"");

    assert!(!null.less(&null, true));
    let ranked = [&null, &fals, &tru, &json, &num, &string];
    for (i, a) in ranked.iter().enumerate() {
        for b in &ranked[i + 1..] {
            assert!(a.less(b, true), "{a:?} should be less than {b:?}");
            assert!(!b.less(a, true), "{b:?} should not be less than {a:?}");
        }
    }

    let s = |text: &str| string_value(text);
    let (abc, bcd, upper) = (s("abc"), s("bcd"), s("ABC"));
    assert!(parse(&abc).less(&parse(&bcd), true));
    assert!(parse(&upper).less(&parse(&abc), true));
    assert!(!parse(&upper).less(&parse(&abc), false));
    assert!(!parse(&abc).less(&parse(&upper), false));

    assert!(parse("123").less(&parse("456"), true));
    assert!(!parse("456").less(&parse("123"), true));
    assert!(!parse("456").less(&parse("456"), true));
    assert!(parse("9").less(&parse("10"), true));
}

#[test]
fn test_less_case_insensitive_table() {
    let less = |a: &str, b: &str| parse(&string_value(a)).less(&parse(&string_value(b)), false);

    assert!(less("abcde", "BBCDE"));
    assert!(less("abcde", "bBCDE"));
    assert!(less("Abcde", "BBCDE"));
    assert!(less("Abcde", "bBCDE"));
    assert!(!less("bbcde", "aBCDE"));
    assert!(!less("bbcde", "ABCDE"));
    assert!(!less("Bbcde", "aBCDE"));
    assert!(!less("Bbcde", "ABCDE"));
    assert!(!less("abcde", "ABCDE"));
    assert!(!less("Abcde", "ABCDE"));
    assert!(!less("ABCDE", "ABCDE"));
    assert!(!less("abcde", "abcde"));
    assert!(!less("123abcde", "123Abcde"));
    assert!(!less("123Abcde", "123Abcde"));
    assert!(!less("123Abcde", "123abcde"));
    assert!(!less("123abcde", "123abcde"));
    assert!(!less("124abcde", "123abcde"));
    assert!(!less("124Abcde", "123Abcde"));
    assert!(!less("124Abcde", "123abcde"));
    assert!(less("124abcde", "125abcde"));
    assert!(less("124Abcde", "125Abcde"));
    assert!(less("124Abcde", "125abcde"));
    assert!(less("abc", "abcd"));
}

#[test]
fn test_iterate_members() {
    let arr = get(BASIC_JSON, "arr");
    let kinds: Vec<_> = arr.iter().map(|(_, v)| v.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Kind::String,
            Kind::Number,
            Kind::String,
            Kind::Json,
            Kind::String,
            Kind::Number
        ]
    );

    let window = get(WIDGET_JSON, "widget.window");
    let keys: Vec<_> = window
        .iter()
        .filter_map(|(k, _)| k.map(|k| k.str().into_owned()))
        .collect();
    assert_eq!(keys, vec!["title", "name", "width", "height"]);
}
