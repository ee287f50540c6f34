use startrace::{counter::BoundedCounter, error::BuildError};

fn visit_forward<T>(counter: &mut BoundedCounter<T>) -> Vec<T>
    where T: startrace::counter::Bound
{
    let mut seen = vec![counter.value()];
    while counter.advance() {
        seen.push(counter.value());
    }
    seen
}

#[test]
fn advance_visits_every_value_then_wraps() {
    let mut counter = BoundedCounter::starting(0, 9, 1).unwrap();
    assert_eq!(visit_forward(&mut counter), (0..=9).collect::<Vec<_>>());
    assert_eq!(counter.value(), 0);
}

#[test]
fn retreat_mirrors_advance() {
    let mut counter = BoundedCounter::starting(2, 10, 2).unwrap();
    let forward = visit_forward(&mut counter);

    assert!(!counter.retreat());
    let mut backward = vec![counter.value()];
    while counter.retreat() {
        backward.push(counter.value());
    }
    backward.reverse();

    assert_eq!(forward, backward);
    assert_eq!(counter.value(), 10);
}

#[test]
fn descending_counter() {
    let mut counter = BoundedCounter::starting(3, 1, -1).unwrap();
    assert!(counter.advance());
    assert_eq!(counter.value(), 2);
    assert!(counter.retreat());
    assert_eq!(counter.value(), 3);
    assert!(!counter.retreat());
    assert_eq!(counter.value(), 1);
}

#[test]
fn uneven_step_wraps_to_last_reachable_value() {
    let mut counter = BoundedCounter::starting(0, 10, 3).unwrap();
    assert_eq!(visit_forward(&mut counter), [0, 3, 6, 9]);
    assert_eq!(counter.positions(), Some(4));

    assert!(!counter.retreat());
    assert_eq!(counter.value(), 9);
}

#[test]
fn real_counter() {
    let mut counter = BoundedCounter::starting(0.0, 1.0, 0.25).unwrap();
    assert_eq!(visit_forward(&mut counter), [0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(counter.positions(), Some(5));
}

#[test]
fn reset_returns_to_start() {
    let mut counter = BoundedCounter::starting(5, 50, 5).unwrap();
    counter.advance();
    counter.advance();
    counter.reset();
    assert_eq!(counter.value(), 5);
}

#[test]
fn new_rejects_invalid_bounds() {
    assert_eq!(BoundedCounter::starting(0, 5, 0), Err(BuildError::ZeroStep));
    assert!(matches!(BoundedCounter::starting(4, 4, 1), Err(BuildError::EqualBounds { .. })));
    assert!(matches!(BoundedCounter::starting(5, 0, 1), Err(BuildError::InvalidBounds { .. })));
    assert!(matches!(BoundedCounter::starting(0, 5, -1), Err(BuildError::InvalidBounds { .. })));
    assert!(matches!(BoundedCounter::new(7, 0, 5, 1), Err(BuildError::InvalidBounds { .. })));
    assert!(matches!(BoundedCounter::starting(0.0, f64::INFINITY, 1.0),
                     Err(BuildError::NonFinite { field: "end" })));
}

#[test]
fn advance_near_integer_limit_does_not_overflow() {
    let mut counter = BoundedCounter::starting(i64::MAX - 2, i64::MAX, 2).unwrap();
    assert!(counter.advance());
    assert_eq!(counter.value(), i64::MAX);
    assert!(!counter.advance());
    assert_eq!(counter.value(), i64::MAX - 2);
}

#[test]
fn huge_range_has_no_countable_positions() {
    let counter = BoundedCounter::starting(i64::MIN, i64::MAX, 1).unwrap();
    assert_eq!(counter.positions(), None);
}

#[test]
fn inexact_real_step_keeps_one_cycle() {
    let mut counter = BoundedCounter::starting(0.0, 0.7, 0.1).unwrap();
    let forward = visit_forward(&mut counter);
    assert_eq!(forward.len(), 8);
    assert_eq!(counter.positions(), Some(8));
    assert_eq!(forward.first(), Some(&0.0));
    assert_eq!(forward.last(), Some(&0.7));

    assert!(!counter.retreat());
    assert_eq!(counter.value(), 0.7);
    let mut backward = vec![counter.value()];
    while counter.retreat() {
        backward.push(counter.value());
    }
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn start_value_must_sit_on_the_step_grid() {
    assert!(matches!(BoundedCounter::new(5, 0, 10, 3), Err(BuildError::InvalidBounds { .. })));

    let mut counter = BoundedCounter::new(6, 0, 10, 3).unwrap();
    assert!(counter.advance());
    assert_eq!(counter.value(), 9);
    assert!(!counter.advance());
    assert_eq!(counter.value(), 0);
}
