use chrono::{TimeZone, Utc};
use startrace::{
    error::BuildError,
    interpreter::value::{core::Value, function::Function},
    token::{
        Token,
        link::LinkOptions,
        time::{TimeMode, TimeToken},
    },
};

fn render(token: &Token) -> String {
    token.render().unwrap_or_else(|e| panic!("{} failed to render: {e}", token.describe()))
}

#[test]
fn constant_never_moves() {
    let mut token = Token::constant("test").unwrap();
    assert!(!token.advance());
    assert!(!token.retreat());
    assert_eq!(render(&token), "test");
    assert_eq!(token.describe(), "ConstToken(test)");
}

#[test]
fn constant_stringifies_its_value() {
    assert_eq!(render(&Token::constant(42).unwrap()), "42");
    assert_eq!(render(&Token::constant(2.5).unwrap()), "2.5");
    assert_eq!(render(&Token::constant(true).unwrap()), "true");
}

#[test]
fn constant_rejects_functions() {
    let f = Function::nullary(|| Ok(Value::Integer(1)));
    assert_eq!(Token::constant(f),
               Err(BuildError::Unstringifiable { token: "ConstToken",
                                                 found: "function", }));
}

#[test]
fn list_cycles_forward_and_back() {
    let mut token = Token::list([1, 2, 3]).unwrap();
    assert_eq!(render(&token), "1");
    assert!(token.advance());
    assert!(token.advance());
    assert_eq!(render(&token), "3");
    assert!(!token.advance());
    assert_eq!(render(&token), "1");
    assert!(!token.retreat());
    assert_eq!(render(&token), "3");
    assert_eq!(token.positions(), Some(3));
    assert_eq!(token.describe(), "ListToken([1, 2, 3])");
}

#[test]
fn single_element_list_never_advances() {
    let mut token = Token::list(["only"]).unwrap();
    for _ in 0..3 {
        assert!(!token.advance());
        assert!(!token.retreat());
        assert_eq!(render(&token), "only");
    }
}

#[test]
fn empty_list_is_rejected() {
    assert_eq!(Token::list(Vec::<Value>::new()), Err(BuildError::EmptyList));
}

#[test]
fn list_of_mixed_values() {
    let mut token = Token::list([Value::from("a"), Value::Real(0.5), Value::array([1, 2])]).unwrap();
    assert_eq!(render(&token), "a");
    token.advance();
    assert_eq!(render(&token), "0.5");
    token.advance();
    assert_eq!(render(&token), "[1, 2]");
}

#[test]
fn range_renders_and_describes() {
    let mut token = Token::range(1, 3, 1).unwrap();
    assert_eq!(token.describe(), "RangeToken(1, 3, 1)");
    assert_eq!(render(&token), "1");
    token.advance();
    token.advance();
    assert_eq!(render(&token), "3");
    token.reset();
    assert_eq!(render(&token), "1");
}

#[test]
fn real_range_keeps_fractional_part() {
    let mut token = Token::real_range(1.0, 2.0, 0.5).unwrap();
    assert_eq!(render(&token), "1.0");
    token.advance();
    assert_eq!(render(&token), "1.5");
    token.advance();
    assert_eq!(render(&token), "2.0");
    assert!(!token.advance());
    assert_eq!(token.describe(), "RangeToken(1.0, 2.0, 0.5)");
}

#[test]
fn range_rejects_bad_bounds() {
    assert_eq!(Token::range(0, 10, 0), Err(BuildError::ZeroStep));
    assert!(matches!(Token::range(1, 1, 1), Err(BuildError::EqualBounds { .. })));
    assert!(matches!(Token::range(5, 1, 1), Err(BuildError::InvalidBounds { .. })));
}

#[test]
fn named_time_modes_use_fixed_formats() {
    let instant = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 58).unwrap();
    let cases = [(TimeMode::Date, "2025-01-31"),
                 (TimeMode::Time, "23:59:58"),
                 (TimeMode::DateTime, "2025-01-31_23:59:58"),
                 (TimeMode::Iso, "2025-01-31T23:59:58")];

    for (mode, expected) in cases {
        let token = TimeToken::new(mode, None).unwrap();
        assert_eq!(token.render_at(&instant).unwrap(), expected, "mode {mode}");
    }
}

#[test]
fn time_tokens_never_move() {
    let mut token = Token::timestamp(TimeMode::Date, None).unwrap();
    assert!(!token.advance());
    assert!(!token.retreat());
    assert_eq!(token.positions(), Some(1));
    assert_eq!(render(&token).len(), "2025-01-31".len());
    assert_eq!(token.describe(), "TimeToken(\"date\")");
}

#[test]
fn custom_time_format() {
    let token = TimeToken::from_name("custom", Some("%Y")).unwrap();
    let instant = Utc.with_ymd_and_hms(1999, 12, 1, 0, 0, 0).unwrap();
    assert_eq!(token.render_at(&instant).unwrap(), "1999");
    assert_eq!(Token::Time(token).describe(), "TimeToken(custom, %Y)");
}

#[test]
fn time_construction_errors() {
    assert_eq!(TimeToken::from_name("week", None),
               Err(BuildError::UnknownTimeMode { mode: "week".to_string() }));
    assert_eq!(TimeToken::new(TimeMode::Custom, None), Err(BuildError::MissingTimeFormat));
    assert_eq!(TimeToken::new(TimeMode::Custom, Some("")), Err(BuildError::MissingTimeFormat));
    assert_eq!(TimeToken::new(TimeMode::Custom, Some("%Q")),
               Err(BuildError::InvalidTimeFormat { fmt: "%Q".to_string() }));
}

#[test]
fn link_requires_opt_in() {
    let result = Token::link("1 + 1", Default::default(), LinkOptions::default());
    assert_eq!(result, Err(BuildError::EvalNotAllowed));
}

#[test]
fn link_rejects_empty_and_malformed_expressions() {
    assert_eq!(Token::link("  ", Default::default(), LinkOptions::allowed()),
               Err(BuildError::EmptyLink));
    assert!(matches!(Token::link("(1 + ", Default::default(), LinkOptions::allowed()),
                     Err(BuildError::InvalidLink { .. })));
}

#[test]
fn link_validation_can_be_deferred() {
    assert!(matches!(Token::link("missing", Default::default(), LinkOptions::allowed()),
                     Err(BuildError::LinkValidation { .. })));

    let token = Token::link("missing",
                            Default::default(),
                            LinkOptions::allowed().without_validation()).unwrap();
    assert!(token.render().is_err());
}

#[test]
fn link_never_moves() {
    let mut token = Token::link("'x'", Default::default(), LinkOptions::allowed()).unwrap();
    assert!(!token.advance());
    assert!(!token.retreat());
    assert_eq!(render(&token), "x");
}

#[test]
fn real_range_counts_match_its_renderings() {
    let mut token = Token::real_range(0.0, 0.7, 0.1).unwrap();
    assert_eq!(token.positions(), Some(8));
    for _ in 0..7 {
        assert!(token.advance());
    }
    assert_eq!(render(&token), "0.7");
    assert!(!token.advance());
    assert!(!token.retreat());
    assert_eq!(render(&token), "0.7");
}
