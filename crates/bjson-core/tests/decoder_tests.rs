use bjson_core::{
    from_reader, from_reader_with, parse, parse_object, parse_object_with, parse_with, Error,
    Options, ParseErrorKind, Parser, StringMode, Tag, Value,
};

fn parse_err(input: &str) -> ParseErrorKind {
    match parse(input) {
        Err(Error::Parse { kind, .. }) => kind,
        other => panic!("expected parse error for {input:?}, got {other:?}"),
    }
}

// ============================================================================
// Primitive Values
// ============================================================================

#[test]
fn parse_null() {
    assert_eq!(parse("null").unwrap().tag(), Tag::Null);
}

#[test]
fn parse_true() {
    assert_eq!(parse("true").unwrap(), true);
}

#[test]
fn parse_false() {
    assert_eq!(parse("false").unwrap(), false);
}

#[test]
fn parse_integer() {
    assert_eq!(parse("42").unwrap(), 42.0);
}

#[test]
fn parse_negative_float() {
    assert_eq!(parse("-3.25").unwrap(), -3.25);
}

#[test]
fn parse_exponent() {
    assert_eq!(parse("1e3").unwrap(), 1000.0);
    assert_eq!(parse("2.5E-1").unwrap(), 0.25);
    assert_eq!(parse("-1e+2").unwrap(), -100.0);
}

#[test]
fn parse_number_forms_the_float_scanner_accepts() {
    assert_eq!(parse("+7").unwrap(), 7.0);
    assert_eq!(parse(".5").unwrap(), 0.5);
    assert_eq!(parse("5.").unwrap(), 5.0);
    assert_eq!(parse("007").unwrap(), 7.0);
}

#[test]
fn numbers_are_always_number_tagged() {
    assert_eq!(parse("1").unwrap().tag(), Tag::Number);
}

#[test]
fn parse_double_quoted_string() {
    let v = parse(r#""hello""#).unwrap();
    assert_eq!(v.tag(), Tag::String);
    assert_eq!(v, "hello");
}

#[test]
fn parse_single_quoted_string() {
    assert_eq!(parse("'hello'").unwrap(), "hello");
}

#[test]
fn parse_empty_string() {
    assert_eq!(parse(r#""""#).unwrap(), "");
}

#[test]
fn string_keeps_inner_whitespace() {
    assert_eq!(parse(r#""  a b  ""#).unwrap(), "  a b  ");
}

#[test]
fn string_keeps_other_quote_kind() {
    assert_eq!(parse(r#""it's""#).unwrap(), "it's");
    assert_eq!(parse(r#"'say "hi"'"#).unwrap(), r#"say "hi""#);
}

#[test]
fn string_keeps_unicode() {
    assert_eq!(parse("\"caf\u{e9} \u{4f60}\u{597d}\"").unwrap(), "caf\u{e9} \u{4f60}\u{597d}");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse("  \n\t 12 \r\n").unwrap(), 12.0);
}

// ============================================================================
// Legacy (no-escape) strings
// ============================================================================

#[test]
fn legacy_backslash_is_literal() {
    assert_eq!(parse(r#""a\nb""#).unwrap(), r"a\nb");
    assert_eq!(parse(r#""C:\path\to""#).unwrap(), r"C:\path\to");
}

#[test]
fn legacy_backslash_does_not_escape_quote() {
    // The string ends at the first quote; the rest is trailing garbage.
    assert!(matches!(
        parse_err(r#""a\"b""#),
        ParseErrorKind::TrailingCharacters { .. }
    ));
}

// ============================================================================
// Escaped strings
// ============================================================================

fn parse_escaped(input: &str) -> Value {
    parse_with(input, Options::escaped()).unwrap()
}

#[test]
fn escaped_mode_decodes_simple_escapes() {
    assert_eq!(parse_escaped(r#""a\nb\tc""#), "a\nb\tc");
    assert_eq!(parse_escaped(r#""q\"q""#), "q\"q");
    assert_eq!(parse_escaped(r#""back\\slash""#), "back\\slash");
    assert_eq!(parse_escaped(r#""\/\b\f\r""#), "/\u{8}\u{c}\r");
    assert_eq!(parse_escaped(r#"'it\'s'"#), "it's");
}

#[test]
fn escaped_mode_decodes_unicode() {
    assert_eq!(parse_escaped(r#""\u00e9""#), "\u{e9}");
    assert_eq!(parse_escaped(r#""\uD83D\uDE00""#), "\u{1F600}");
}

#[test]
fn escaped_mode_rejects_unknown_escape() {
    match parse_with(r#""\q""#, Options::escaped()) {
        Err(Error::Parse {
            kind: ParseErrorKind::InvalidEscape { sequence },
            ..
        }) => assert_eq!(sequence, r"\q"),
        other => panic!("expected InvalidEscape, got {other:?}"),
    }
}

#[test]
fn escaped_mode_rejects_lone_surrogate() {
    let err = parse_with(r#""\uD83D""#, Options::escaped()).unwrap_err();
    assert!(matches!(
        err.parse_kind(),
        Some(ParseErrorKind::InvalidEscape { .. })
    ));
    let err = parse_with(r#""\uDE00""#, Options::escaped()).unwrap_err();
    assert!(matches!(
        err.parse_kind(),
        Some(ParseErrorKind::InvalidEscape { .. })
    ));
}

#[test]
fn escaped_mode_rejects_bad_hex() {
    let err = parse_with(r#""\u12G4""#, Options::escaped()).unwrap_err();
    assert!(matches!(
        err.parse_kind(),
        Some(ParseErrorKind::InvalidEscape { .. })
    ));
}

#[test]
fn escaped_mode_applies_to_keys() {
    let opts = Options::new().with_strings(StringMode::Escaped);
    let v = parse_with(r#"{"a\tb":1}"#, opts).unwrap();
    assert!(v.as_object().unwrap().contains_key("a\tb"));
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn parse_array_of_numbers() {
    let v = parse("[1,2,3]").unwrap();
    assert_eq!(v.tag(), Tag::Array);
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 3);
    for (item, expected) in items.iter().zip([1.0, 2.0, 3.0]) {
        assert_eq!(item.tag(), Tag::Number);
        assert_eq!(*item, expected);
    }
}

#[test]
fn parse_empty_array() {
    let v = parse("[]").unwrap();
    assert_eq!(v.tag(), Tag::Array);
    assert!(v.as_array().unwrap().is_empty());
}

#[test]
fn empty_array_inside_array_is_kept() {
    let v = parse("[[],1]").unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v.get(0).unwrap().tag(), Tag::Array);
    assert_eq!(v.get(1).unwrap(), &1.0);
}

#[test]
fn parse_array_with_whitespace() {
    let v = parse("[ 1 , 'two' ,\n true , null ]").unwrap();
    let tags: Vec<Tag> = v.as_array().unwrap().iter().map(Value::tag).collect();
    assert_eq!(tags, [Tag::Number, Tag::String, Tag::True, Tag::Null]);
}

#[test]
fn parse_nested_arrays() {
    let v = parse("[[1,[2]],[]]").unwrap();
    let inner = v.get(0).unwrap().get(1).unwrap();
    assert_eq!(inner.get(0).unwrap(), &2.0);
}

#[test]
fn array_rejects_trailing_comma() {
    assert!(matches!(
        parse_err("[1,]"),
        ParseErrorKind::MalformedLiteral { .. }
    ));
}

#[test]
fn array_rejects_missing_comma() {
    match parse_err("[1 2]") {
        ParseErrorKind::MalformedLiteral { expected, found } => {
            assert_eq!(expected, "',' or ']'");
            assert_eq!(found, "'2'");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn array_rejects_leading_comma() {
    assert!(parse("[,1]").is_err());
}

#[test]
fn array_rejects_wrong_closer() {
    assert!(parse("[1}").is_err());
}

#[test]
fn unterminated_array_is_unexpected_end() {
    assert!(matches!(
        parse_err("[1,2"),
        ParseErrorKind::UnexpectedEnd { .. }
    ));
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn parse_object_with_array_member() {
    let v = parse(r#"{"a":1,"b":[true,false]}"#).unwrap();
    let object = v.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["a"], 1.0);
    let b = &object["b"];
    assert_eq!(b.as_array().unwrap().len(), 2);
    assert_eq!(b.get(0).unwrap().tag(), Tag::True);
    assert_eq!(b.get(1).unwrap().tag(), Tag::False);
}

#[test]
fn parse_object_entry_point() {
    let object = parse_object(r#" { 'x' : "y" } "#).unwrap();
    assert_eq!(object["x"], "y");
}

#[test]
fn parse_object_entry_point_requires_brace() {
    assert!(parse_object("[1]").is_err());
}

#[test]
fn parse_empty_object() {
    let v = parse("{}").unwrap();
    assert!(v.as_object().unwrap().is_empty());
}

#[test]
fn nested_objects_are_accepted() {
    let v = parse(r#"{"outer":{"inner":[{"k":null}]}}"#).unwrap();
    let inner = &v.as_object().unwrap()["outer"].as_object().unwrap()["inner"];
    assert_eq!(inner.get(0).unwrap().tag(), Tag::Object);
}

#[test]
fn objects_inside_arrays() {
    let v = parse(r#"[{"a":1},{"a":2}]"#).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v.get(1).unwrap().as_object().unwrap()["a"], 2.0);
}

#[test]
fn duplicate_keys_keep_first() {
    let v = parse(r#"{"k":1,"k":2}"#).unwrap();
    let object = v.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["k"], 1.0);
}

#[test]
fn object_keys_iterate_sorted() {
    let object = parse_object(r#"{"b":1,"c":2,"a":3}"#).unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn object_rejects_missing_colon() {
    match parse_err(r#"{"a" 1}"#) {
        ParseErrorKind::MalformedLiteral { expected, .. } => assert_eq!(expected, "':'"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn object_rejects_unquoted_key() {
    assert!(parse("{a:1}").is_err());
}

#[test]
fn object_rejects_trailing_comma() {
    assert!(parse(r#"{"a":1,}"#).is_err());
}

#[test]
fn object_rejects_missing_value() {
    assert!(parse(r#"{"a":}"#).is_err());
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn truncated_keyword_fails() {
    match parse_err("tru") {
        ParseErrorKind::MalformedLiteral { expected, found } => {
            assert_eq!(expected, "`true`");
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn misspelled_keywords_fail() {
    for input in ["nul", "nulL", "fals", "flase", "trUe"] {
        assert!(
            matches!(parse_err(input), ParseErrorKind::MalformedLiteral { .. }),
            "{input}"
        );
    }
}

#[test]
fn keyword_followed_by_letters_is_trailing() {
    assert!(matches!(
        parse_err("trueish"),
        ParseErrorKind::TrailingCharacters { .. }
    ));
}

#[test]
fn malformed_numbers_fail() {
    for input in ["-", "+", ".", "1e", "1e+", "abc", "Infinity", "inf1", "NaNa", "-infx"] {
        match parse_err(input) {
            ParseErrorKind::MalformedNumber { text } => assert_eq!(text, input),
            other => panic!("{input}: unexpected {other:?}"),
        }
    }
}

#[test]
fn non_finite_numbers_parse() {
    assert_eq!(parse("inf").unwrap(), f64::INFINITY);
    assert_eq!(parse("+inf").unwrap(), f64::INFINITY);
    assert_eq!(parse("-inf").unwrap(), f64::NEG_INFINITY);
    assert!(parse("NaN").unwrap().as_f64().unwrap().is_nan());
    assert!(parse("-NaN").unwrap().as_f64().unwrap().is_nan());

    let v = parse("[inf, -inf,NaN]").unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1], f64::NEG_INFINITY);
    assert!(items[2].as_f64().unwrap().is_nan());

    let object = parse_object("{'lo':-inf,'hi':inf}").unwrap();
    assert_eq!(object["lo"], f64::NEG_INFINITY);
    assert_eq!(object["hi"], f64::INFINITY);
}

#[test]
fn empty_input_is_unexpected_end() {
    assert!(matches!(
        parse_err(""),
        ParseErrorKind::UnexpectedEnd { .. }
    ));
    assert!(matches!(
        parse_err("   "),
        ParseErrorKind::UnexpectedEnd { .. }
    ));
}

#[test]
fn unterminated_string_is_unexpected_end() {
    assert!(matches!(
        parse_err(r#""abc"#),
        ParseErrorKind::UnexpectedEnd { .. }
    ));
}

#[test]
fn lone_closer_is_rejected() {
    assert!(parse("]").is_err());
    assert!(parse("}").is_err());
}

#[test]
fn trailing_content_is_rejected() {
    assert!(matches!(
        parse_err("1 2"),
        ParseErrorKind::TrailingCharacters { .. }
    ));
}

#[test]
fn error_reports_line_and_column() {
    match parse("[\n  1,\n  tx\n]") {
        Err(Error::Parse { line, column, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(column, 4);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn error_message_is_readable() {
    let err = parse("[1 2]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "parse error at line 1, column 4: expected ',' or ']', found '2'"
    );
}

// ============================================================================
// Limits and streaming
// ============================================================================

#[test]
fn nesting_limit_is_enforced() {
    let opts = Options::new().with_max_depth(3);
    assert!(parse_with("[[[1]]]", opts).is_ok());
    match parse_with("[[[[1]]]]", opts) {
        Err(Error::Parse {
            kind: ParseErrorKind::DepthLimitExceeded { limit },
            ..
        }) => assert_eq!(limit, 3),
        other => panic!("expected depth error, got {other:?}"),
    }
}

#[test]
fn default_nesting_limit_stops_pathological_input() {
    let input = "[".repeat(100_000);
    assert!(matches!(
        parse_err(&input),
        ParseErrorKind::DepthLimitExceeded { .. }
    ));
}

#[test]
fn parser_reads_successive_values() {
    let mut parser = Parser::new(" 1 [2] 'three'\n{\"four\":4} ");
    let mut values = Vec::new();
    while let Some(v) = parser.next_value().unwrap() {
        values.push(v);
    }
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], 1.0);
    assert_eq!(values[1].tag(), Tag::Array);
    assert_eq!(values[2], "three");
    assert_eq!(values[3].tag(), Tag::Object);
    assert!(parser.finish().is_ok());
}

#[test]
fn parser_stops_at_first_error() {
    let mut parser = Parser::new("1 tru 3");
    assert_eq!(parser.next_value().unwrap().unwrap(), 1.0);
    assert!(parser.next_value().is_err());
}

#[test]
fn from_reader_parses_byte_source() {
    let input: &[u8] = br#"{"k":[1,2]}"#;
    let v = from_reader(input).unwrap();
    assert_eq!(v.as_object().unwrap()["k"].as_array().unwrap().len(), 2);
}

#[test]
fn from_reader_reports_invalid_utf8_position() {
    let input: &[u8] = b"\"\xff\"";
    match from_reader(input) {
        Err(Error::Parse { line, column, kind }) => {
            assert_eq!((line, column), (1, 2));
            assert_eq!(kind, ParseErrorKind::InvalidUtf8 { offset: 1 });
        }
        other => panic!("unexpected {other:?}"),
    }

    let input: &[u8] = b"[1,\n 'ok',\n 'b\xc3']";
    match from_reader_with(input, Options::escaped()) {
        Err(Error::Parse { line, column, kind }) => {
            assert_eq!((line, column), (3, 4));
            assert_eq!(kind, ParseErrorKind::InvalidUtf8 { offset: 14 });
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn parser_reads_object_then_tracks_position() {
    let mut parser = Parser::new(r#"{"a":[1]} 2"#);
    let object = parser.read_object().unwrap();
    assert_eq!(object["a"].as_array().unwrap().len(), 1);
    assert_eq!(parser.position(), 9);
    assert_eq!(parser.next_value().unwrap().unwrap(), 2.0);
    assert_eq!(parser.position(), 11);
    assert!(parser.next_value().unwrap().is_none());
}

#[test]
fn from_reader_with_applies_options() {
    let input: &[u8] = br#"["a\nb"]"#;
    let v = from_reader_with(input, Options::escaped()).unwrap();
    assert_eq!(v.get(0).unwrap(), &"a\nb");
}

#[test]
fn parse_object_with_applies_options() {
    let object = parse_object_with(r#"{"k":"a\tb"}"#, Options::escaped()).unwrap();
    assert_eq!(object["k"], "a\tb");

    let legacy = parse_object(r#"{"k":"a\tb"}"#).unwrap();
    assert_eq!(legacy["k"], r"a\tb");

    match parse_object_with(r#"{"a":{"b":{}}}"#, Options::new().with_max_depth(2)) {
        Err(Error::Parse { kind, .. }) => {
            assert_eq!(kind, ParseErrorKind::DepthLimitExceeded { limit: 2 });
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        parse_object_with(r#"{"a":{"b":{}}}"#, Options::new().with_max_depth(3))
            .unwrap()
            .len(),
        1
    );
}
