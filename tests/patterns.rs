use pretty_assertions::assert_eq;
use startrace::{pattern::Pattern, token::Token};

fn file_pattern() -> Pattern {
    Pattern::new(vec![Token::constant("test_").unwrap(),
                      Token::range(0, 2, 1).unwrap(),
                      Token::range(0, 9, 1).unwrap()])
}

#[test]
fn odometer_visits_every_position_once() {
    let mut pattern = file_pattern();
    let expected = (0..30).map(|n| format!("test_{n:02}")).collect::<Vec<_>>();

    let mut seen = Vec::new();
    loop {
        seen.push(pattern.render().unwrap());
        if !pattern.advance() {
            break;
        }
    }

    assert_eq!(seen, expected);
    assert_eq!(pattern.render().unwrap(), "test_00");
    assert_eq!(pattern.positions(), Some(30));
}

#[test]
fn carry_reports_false_only_after_the_last_position() {
    let mut pattern = Pattern::new(vec![Token::constant("test").unwrap(),
                                        Token::range(1, 3, 1).unwrap(),
                                        Token::range(1, 3, 1).unwrap()]);

    let mut steps = Vec::new();
    for _ in 0..9 {
        let rendered = pattern.render().unwrap();
        steps.push((rendered, pattern.advance()));
    }

    let expected = [("test11", true),
                    ("test12", true),
                    ("test13", true),
                    ("test21", true),
                    ("test22", true),
                    ("test23", true),
                    ("test31", true),
                    ("test32", true),
                    ("test33", false)].map(|(s, moved)| (s.to_string(), moved));
    assert_eq!(steps, expected);
    assert_eq!(pattern.render().unwrap(), "test11");
}

#[test]
fn retreat_walks_the_cycle_backwards() {
    let mut pattern = file_pattern();
    assert!(!pattern.retreat());
    assert_eq!(pattern.render().unwrap(), "test_29");
    assert!(pattern.retreat());
    assert_eq!(pattern.render().unwrap(), "test_28");

    pattern.shift(2);
    assert_eq!(pattern.render().unwrap(), "test_00");
}

#[test]
fn shift_and_compound_assignment() {
    let mut pattern = file_pattern();
    pattern += 15;
    assert_eq!(pattern.render().unwrap(), "test_15");
    pattern -= 16;
    assert_eq!(pattern.render().unwrap(), "test_29");
    pattern.shift(0);
    assert_eq!(pattern.render().unwrap(), "test_29");
    pattern.shift(31);
    assert_eq!(pattern.render().unwrap(), "test_00");
}

#[test]
fn extreme_shifts_land_on_their_exact_position() {
    // 2^63 = 8 (mod 30), 2^63 - 1 = 7 (mod 30).
    let cases: [(fn(&mut Pattern), &str); 5] = [(|p| *p -= i64::MIN, "test_08"),
                                                (|p| *p += i64::MIN, "test_22"),
                                                (|p| *p += i64::MAX, "test_07"),
                                                (|p| *p -= i64::MAX, "test_23"),
                                                (|p| p.shift(i64::MIN), "test_22")];

    for (apply, expected) in cases {
        let mut pattern = file_pattern();
        apply(&mut pattern);
        assert_eq!(pattern.render().unwrap(), expected);
    }
}

#[test]
fn subtracting_matches_shifting_back() {
    for n in [-61, -30, -1, 1, 29, 30, 47] {
        let mut subtracted = file_pattern();
        let mut shifted = file_pattern();
        subtracted -= n;
        shifted.shift(-n);
        assert_eq!(subtracted.render().unwrap(), shifted.render().unwrap(), "n = {n}");
    }
}

#[test]
fn reset_returns_to_the_first_rendering() {
    let mut pattern = file_pattern();
    pattern.shift(17);
    pattern.reset();
    assert_eq!(pattern.render().unwrap(), "test_00");
}

#[test]
fn list_and_time_tokens_combine() {
    use startrace::token::time::TimeMode;

    let mut pattern: Pattern = [Token::list(["A", "B"]).unwrap(),
                                Token::constant("-").unwrap(),
                                Token::timestamp(TimeMode::Custom, Some("x%%")).unwrap()].into_iter()
                                                                                        .collect();
    assert_eq!(pattern.renderings(3).unwrap(), ["A-x%", "B-x%", "A-x%"]);
    assert_eq!(pattern.positions(), Some(2));
}

#[test]
fn single_element_list_does_not_carry() {
    let mut pattern = Pattern::new(vec![Token::list(["x"]).unwrap(), Token::range(1, 2, 1).unwrap()]);
    assert_eq!(pattern.renderings(4).unwrap(), ["x1", "x2", "x1", "x2"]);
}

#[test]
fn pattern_without_moving_tokens_always_wraps() {
    let mut pattern = Pattern::new(vec![Token::constant("fixed").unwrap()]);
    assert!(!pattern.advance());
    assert!(!pattern.retreat());
    assert_eq!(pattern.render().unwrap(), "fixed");
    assert_eq!(pattern.positions(), Some(1));
}

#[test]
fn empty_pattern_renders_nothing() {
    let mut pattern = Pattern::default();
    assert!(pattern.is_empty());
    assert_eq!(pattern.render().unwrap(), "");
    assert!(!pattern.advance());
}

#[test]
fn positions_overflow_is_reported() {
    let pattern = Pattern::new(vec![Token::range(0, i64::MAX, 1).unwrap(),
                                    Token::range(0, i64::MAX, 1).unwrap()]);
    assert_eq!(pattern.positions(), None);
}
