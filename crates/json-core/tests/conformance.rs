//! Black-box end-to-end coverage of the documented testable properties:
//! universal invariants, numeric boundary cases, and the concrete
//! scenarios spelled out for this parser.

use json_core::{parse, parse_many, Error, ErrorKind, Number, Options, Value};

fn strict(input: &str) -> Result<Value<'_>, Error> {
    parse(input.as_bytes(), Options::strict())
}

fn lenient(input: &str) -> Result<Value<'_>, Error> {
    parse(input.as_bytes(), Options::lenient())
}

#[test]
fn scalars_round_trip() {
    assert_eq!(strict("true").unwrap(), Value::Bool(true));
    assert_eq!(strict("null").unwrap(), Value::Null);
    assert_eq!(
        strict("\"hello, world\"").unwrap(),
        Value::String("hello, world".into())
    );
}

#[test]
fn arrays() {
    assert_eq!(strict("[]").unwrap(), Value::Array(vec![]));
    assert_eq!(strict("[null]").unwrap(), Value::Array(vec![Value::Null]));
    assert_eq!(
        strict("[false,true,null,false]").unwrap(),
        Value::Array(vec![
            Value::Bool(false),
            Value::Bool(true),
            Value::Null,
            Value::Bool(false),
        ])
    );
}

#[test]
fn flat_object() {
    let v = strict(r#"{"a":null,"b":0}"#).unwrap();
    let Value::Object(map) = v else {
        panic!("expected object")
    };
    assert_eq!(map.get("a"), Some(&Value::Null));
    assert_eq!(map.get("b"), Some(&Value::Number(Number::Int64(0))));
}

#[test]
fn nested_multi_key_object() {
    let input = concat!(
        r#"{"key":182993,"key2":"value2","key3":null,"#,
        r#""key4":["hello","is","this","working"],"key5":{"another":false}}"#
    );
    let v = strict(input).unwrap();
    let Value::Object(map) = v else {
        panic!("expected object")
    };
    assert_eq!(map.len(), 5);
    assert_eq!(map.get("key"), Some(&Value::Number(Number::Int64(182_993))));
    assert_eq!(map.get("key2"), Some(&Value::String("value2".into())));
    assert_eq!(map.get("key3"), Some(&Value::Null));
    let Some(Value::Array(items)) = map.get("key4") else {
        panic!("expected array at key4")
    };
    assert_eq!(
        items,
        &vec![
            Value::String("hello".into()),
            Value::String("is".into()),
            Value::String("this".into()),
            Value::String("working".into()),
        ]
    );
    let Some(Value::Object(inner)) = map.get("key5") else {
        panic!("expected object at key5")
    };
    assert_eq!(inner.get("another"), Some(&Value::Bool(false)));
}

#[test]
fn strict_rejects_unquoted_literal_lenient_accepts_it() {
    assert_eq!(
        strict("[a]").unwrap_err().kind(),
        &ErrorKind::NotAKeywordOrNumber
    );
    assert_eq!(
        lenient("[a]").unwrap(),
        Value::Array(vec![Value::String("a".into())])
    );
}

#[test]
fn lenient_rescans_number_or_keyword_run_into_as_unquoted_string() {
    assert_eq!(
        lenient("[123abc]").unwrap(),
        Value::Array(vec![Value::String("123abc".into())])
    );
    assert_eq!(
        lenient("nullable").unwrap(),
        Value::String("nullable".into())
    );
    assert_eq!(
        strict("123abc").unwrap_err().kind(),
        &ErrorKind::NotAKeywordOrNumber
    );
}

#[test]
fn strict_rejects_trailing_comma_lenient_accepts_it() {
    assert_eq!(
        strict("[1,2,]").unwrap_err().kind(),
        &ErrorKind::UnexpectedChar
    );
    assert_eq!(
        lenient("[1,2,]").unwrap(),
        Value::Array(vec![Value::Number(Number::Int64(1)), Value::Number(Number::Int64(2))])
    );
}

#[test]
fn unclosed_structures_report_ended_inside_structure() {
    for input in ["{", "["] {
        assert_eq!(
            strict(input).unwrap_err().kind(),
            &ErrorKind::EndedInsideStructure
        );
    }
}

#[test]
fn structurally_invalid_inputs_report_unexpected_char() {
    for input in ["}", "]", ":", ",", "{]", "[}", "[,", "{,"] {
        assert_eq!(
            strict(input).unwrap_err().kind(),
            &ErrorKind::UnexpectedChar,
            "input {input:?}"
        );
    }
}

#[test]
fn raw_whitespace_inside_quotes_is_rejected() {
    assert_eq!(
        strict("\"a\tb\"").unwrap_err().kind(),
        &ErrorKind::TabNewlineCrInsideQuotes
    );
    assert_eq!(
        strict("\"a\nb\"").unwrap_err().kind(),
        &ErrorKind::TabNewlineCrInsideQuotes
    );
}

#[test]
fn single_root_rejects_multiple_values_parse_many_accepts_them() {
    assert_eq!(
        strict("null null").unwrap_err().kind(),
        &ErrorKind::MultipleRoots
    );
    let many = parse_many(b"null null", Options::strict()).unwrap();
    assert_eq!(many, vec![Value::Null, Value::Null]);
}

#[test]
fn int64_boundaries() {
    assert_eq!(
        strict("-9223372036854775808").unwrap(),
        Value::Number(Number::Int64(i64::MIN))
    );
    assert_eq!(
        strict("-9223372036854775807").unwrap(),
        Value::Number(Number::Int64(-9_223_372_036_854_775_807))
    );
    assert_eq!(
        strict("9223372036854775806").unwrap(),
        Value::Number(Number::Int64(9_223_372_036_854_775_806))
    );
    assert_eq!(
        strict("9223372036854775807").unwrap(),
        Value::Number(Number::Int64(i64::MAX))
    );
}

#[test]
fn bigint_boundaries() {
    for input in [
        "-9223372036854775809",
        "9223372036854775808",
        "18446744073709551615",
        "18446744073709551616",
    ] {
        let v = strict(input).unwrap();
        assert!(
            matches!(v, Value::Number(Number::BigInt(_))),
            "expected BigInt for {input:?}, got {v:?}"
        );
    }
}

#[test]
fn huge_literal_preserves_source_bytes() {
    let input = "123.4E-9999999999999999999";
    match strict(input).unwrap() {
        Value::Number(Number::HugeLiteral(s)) => assert_eq!(s.as_str(), input),
        other => panic!("expected HugeLiteral, got {other:?}"),
    }
}

#[test]
fn zero_and_negative_zero_are_int64_zero() {
    assert_eq!(strict("0").unwrap(), Value::Number(Number::Int64(0)));
    assert_eq!(strict("-0").unwrap(), Value::Number(Number::Int64(0)));
}

#[test]
fn double_literals_produce_exact_values() {
    let cases: &[(&str, f64)] = &[
        ("0.0", 0.0),
        ("0e0", 0.0),
        ("1e1", 10.0),
        ("1.234e2", 123.4),
        ("1.234E-2", 0.01234),
    ];
    for (literal, expected) in cases {
        match strict(literal).unwrap() {
            Value::Number(Number::Double(v)) => {
                assert!((v - expected).abs() < 1e-12, "{literal} -> {v}");
            }
            other => panic!("expected Double for {literal:?}, got {other:?}"),
        }
    }
}

#[test]
fn round_trip_through_serializer() {
    let inputs = [
        r#"{"key":182993,"key2":"value2","key3":null,"key4":["hello","is","this","working"],"key5":{"another":false}}"#,
        "[false,true,null,false]",
        r#""a\nb\tc""#,
        "123.4",
        "-9223372036854775808",
    ];
    for input in inputs {
        let value = strict(input).unwrap();
        let rendered = value.to_json_string();
        let reparsed = strict(&rendered).unwrap();
        assert_eq!(value, reparsed, "round trip failed for {input:?}");
    }
}

#[test]
fn unicode_escape_and_surrogate_pair() {
    assert_eq!(strict("\"\\u0041\"").unwrap(), Value::String("A".into()));
    assert_eq!(
        strict("\"\\uD83D\\uDE00\"").unwrap(),
        Value::String("\u{1F600}".into())
    );
}

#[test]
fn lenient_comments_are_ignored() {
    let input = "// leading comment\n{\n  \"a\": 1, # trailing comment\n  \"b\": /* inline */ 2\n}";
    let v = lenient(input).unwrap();
    let Value::Object(map) = v else {
        panic!("expected object")
    };
    assert_eq!(map.get("a"), Some(&Value::Number(Number::Int64(1))));
    assert_eq!(map.get("b"), Some(&Value::Number(Number::Int64(2))));
}

#[test]
fn lenient_is_a_superset_of_strict() {
    let inputs = [
        "true",
        "null",
        r#"{"a":1,"b":[1,2,3]}"#,
        "[1,2.5,-3e10]",
        r#""with \\ escapes \n""#,
    ];
    for input in inputs {
        assert_eq!(
            strict(input).unwrap(),
            lenient(input).unwrap(),
            "strict/lenient diverged on {input:?}"
        );
    }
}

#[test]
fn unsupported_encoding_is_a_clear_error_not_a_misparse() {
    let utf16_le = [b'[', 0x00, b' ', 0x00];
    assert!(matches!(
        parse(&utf16_le, Options::strict()).unwrap_err().kind(),
        ErrorKind::UnsupportedEncoding(_)
    ));
}

#[test]
fn never_panics_on_arbitrary_byte_strings() {
    // A sample of adversarial byte sequences: lone continuation bytes,
    // truncated escapes, deeply-nested openers with no closers, etc. None
    // of these may panic; each must return a `Result`.
    let samples: &[&[u8]] = &[
        b"\xff\xfe\xfd",
        b"{{{{{{{{{{",
        b"[[[[[[[[[[",
        b"\"\\u",
        b"\"\\",
        b"-",
        b".",
        b"123.",
        b"123e",
        &[0x00, 0x01, 0x02],
    ];
    for sample in samples {
        let _ = parse(sample, Options::strict());
        let _ = parse(sample, Options::lenient());
    }
}
