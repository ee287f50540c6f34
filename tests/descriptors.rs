use pretty_assertions::assert_eq;
use serde_json::json;
use startrace::{
    Error,
    context::DynamicContext,
    descriptor::{PatternDescriptor, TokenDescriptor},
    error::{BuildError, DescriptorError},
    interpreter::value::{
        core::{Bindings, Value},
        function::Function,
    },
    pattern::Pattern,
    token::{
        Token,
        link::LinkOptions,
        time::{TimeMode, TimeToken},
    },
};

#[test]
fn tokens_rebuild_from_their_descriptors() {
    let tokens = [Token::constant("file_").unwrap(),
                  Token::list([Value::from("a"), Value::Integer(2)]).unwrap(),
                  Token::range(0, 9, 3).unwrap(),
                  Token::real_range(1.0, 0.0, -0.25).unwrap(),
                  TimeToken::new(TimeMode::Custom, Some("%H%M")).unwrap().into(),
                  Token::timestamp(TimeMode::Iso, None).unwrap()];

    for token in tokens {
        let rebuilt = Token::from_descriptor(&token.to_descriptor()).unwrap();
        assert_eq!(rebuilt.describe(), token.describe());
        assert_eq!(rebuilt.to_descriptor(), token.to_descriptor());
    }
}

#[test]
fn descriptors_write_plain_json() {
    let time = TimeToken::new(TimeMode::Custom, Some("%Y")).unwrap();
    assert_eq!(Token::from(time).to_descriptor().to_json().unwrap(),
               json!({"type": "time", "mode": "custom", "fmt": "%Y"}));

    let date = Token::timestamp(TimeMode::Date, None).unwrap();
    assert_eq!(date.to_descriptor().to_json().unwrap(), json!({"type": "time", "mode": "date"}));

    let list = Token::list([Value::Real(0.5), Value::array(["x"])]).unwrap();
    assert_eq!(list.to_descriptor().to_json().unwrap(),
               json!({"type": "list", "values": [0.5, ["x"]]}));

    let constant = Token::constant(12).unwrap();
    assert_eq!(constant.to_descriptor().to_json().unwrap(),
               json!({"type": "const", "value": "12"}));
}

#[test]
fn link_descriptor_snapshots_its_bindings() {
    let cell = DynamicContext::new(4);
    let mut bindings = Bindings::new();
    bindings.insert("x".to_string(), cell.clone().into());

    let token = Token::link("x + 1", bindings, LinkOptions::allowed().without_validation()).unwrap();
    let descriptor = token.to_descriptor();
    assert_eq!(descriptor.to_json().unwrap(),
               json!({"type": "link", "link": "x + 1", "context": {"x": 4}, "eval_allowed": true,
                      "validate": false}));

    // The cell is shared, so the descriptor follows later writes.
    cell.set(9);
    assert_eq!(descriptor.to_json().unwrap()["context"]["x"], json!(9));

    let rebuilt = Token::from_descriptor(&descriptor).unwrap();
    assert_eq!(rebuilt.render().unwrap(), "10");
}

#[test]
fn functions_cannot_be_serialized() {
    let mut bindings = Bindings::new();
    bindings.insert("f".to_string(), Function::nullary(|| Ok(Value::Integer(1))).into());
    let token = Token::link("f()", bindings, LinkOptions::allowed()).unwrap();

    let err = token.to_descriptor().to_json().unwrap_err();
    assert!(matches!(&err,
                     DescriptorError::Unserializable { field, found: "function" } if field == "context.f"),
            "{err}");

    let mut global = Bindings::new();
    global.insert("g".to_string(),
                  Value::array([Value::Integer(1), DynamicContext::new(Function::nullary(|| Ok(true.into()))).into()]));
    let pattern = PatternDescriptor::default().with_global_context(global);
    assert!(matches!(pattern.to_json(),
                     Err(DescriptorError::Unserializable { found: "function", .. })));
}

#[test]
fn pattern_descriptor_reads_json() {
    let descriptor = PatternDescriptor::from_json(&json!({
        "tokens": [
            {"type": "link", "link": "site + '-'"},
            {"type": "range", "start": 1, "end": 3, "step": 1},
        ],
        "global_context": {"site": "north"},
        "eval_allowed": true,
    })).unwrap();

    let mut expected = Bindings::new();
    expected.insert("site".to_string(), "north".into());
    assert_eq!(descriptor,
               PatternDescriptor { tokens:         vec![TokenDescriptor::link("site + '-'"),
                                                        TokenDescriptor::Range { start: 1.into(),
                                                                                 end:   3.into(),
                                                                                 step:  1.into(), }],
                                   global_context: expected,
                                   eval_allowed:   true, });

    let mut pattern = Pattern::from_descriptor(&descriptor).unwrap();
    assert_eq!(pattern.renderings(4).unwrap(), ["north-1", "north-2", "north-3", "north-1"]);
}

#[test]
fn pattern_round_trips_through_json() {
    let pattern = Pattern::new(vec![Token::constant("run_").unwrap(),
                                    Token::range(1, 5, 2).unwrap(),
                                    Token::list(["a", "b"]).unwrap()]);
    let json = pattern.to_descriptor().to_json().unwrap();
    assert_eq!(json,
               json!({
                   "tokens": [
                       {"type": "const", "value": "run_"},
                       {"type": "range", "start": 1, "end": 5, "step": 2},
                       {"type": "list", "values": ["a", "b"]},
                   ],
                   "global_context": {},
                   "eval_allowed": false,
               }));

    let rebuilt = Pattern::from_descriptor(&PatternDescriptor::from_json(&json).unwrap()).unwrap();
    assert_eq!(rebuilt, pattern);
}

#[test]
fn malformed_json_names_the_field() {
    let cases = [(json!({"value": 1}), "Descriptor is missing its 'type' field."),
                 (json!({"type": "wheel"}),
                  "Unknown token type 'wheel'. Valid types are: const, list, range, time, link."),
                 (json!({"type": "list"}), "Descriptor of type 'list' is missing required field 'values'."),
                 (json!({"type": "list", "values": 3}), "Field 'values' must be an array."),
                 (json!({"type": "time", "mode": 1}), "Field 'mode' must be a string."),
                 (json!({"type": "const", "value": null}), "Field 'value' must be a value other than null."),
                 (json!({"type": "link", "link": "x", "context": []}), "Field 'context' must be an object."),
                 (json!({"type": "link", "link": "x", "validate": "no"}), "Field 'validate' must be a boolean.")];

    for (json, message) in cases {
        let err = TokenDescriptor::from_json(&json).unwrap_err();
        assert_eq!(err.to_string(), message, "reading {json}");
    }

    let err = PatternDescriptor::from_json(&json!({"tokens": {}})).unwrap_err();
    assert_eq!(err.to_string(), "Field 'tokens' must be an array.");
    assert!(matches!(PatternDescriptor::from_json_str("{"), Err(DescriptorError::Json(_))));
}

#[test]
fn descriptors_that_do_not_build() {
    let range = TokenDescriptor::Range { start: 1.into(),
                                         end:   2.5.into(),
                                         step:  1.into(), };
    assert_eq!(Token::from_descriptor(&range), Err(BuildError::MixedNumericTypes));

    let range = TokenDescriptor::Range { start: "a".into(),
                                         end:   2.into(),
                                         step:  1.into(), };
    assert_eq!(Token::from_descriptor(&range),
               Err(BuildError::NotNumeric { field: "start",
                                            found: "string", }));

    let time = TokenDescriptor::Time { mode: "custom".to_string(),
                                       fmt:  None, };
    assert_eq!(Token::try_from(&time), Err(BuildError::MissingTimeFormat));

    let err = startrace::build_pattern(r#"{"tokens": [{"type": "list", "values": []}]}"#).unwrap_err();
    assert!(matches!(err, Error::Build(BuildError::EmptyList)), "{err}");
}
