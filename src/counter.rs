use std::fmt;

use crate::{error::BuildError, util::num::f64_floor_to_u64};

/// Numeric domain a [`BoundedCounter`] can step through.
///
/// Implemented for `i64` and `f64`. All four counter fields share one
/// implementor, so a counter can never mix integer and real values.
pub trait Bound: Copy + PartialOrd + fmt::Display + fmt::Debug {
    /// The additive identity, used to tell the step direction.
    const ZERO: Self;

    /// Returns `false` for values that cannot take part in counting.
    fn is_finite(self) -> bool;

    /// Number of whole `step`s that fit between `start` and `end`.
    fn steps_between(start: Self, end: Self, step: Self) -> Option<u64>;

    /// Returns `start + step * n`.
    fn offset(start: Self, step: Self, n: u64) -> Option<Self>;

    /// Tests whether `value` misses `target` only by rounding, measured
    /// against the size of `step`.
    fn near(value: Self, target: Self, step: Self) -> bool;
}

impl Bound for i64 {
    const ZERO: Self = 0;

    fn is_finite(self) -> bool {
        true
    }

    fn steps_between(start: Self, end: Self, step: Self) -> Option<u64> {
        let steps = (i128::from(end) - i128::from(start)) / i128::from(step);
        u64::try_from(steps).ok()
    }

    fn offset(start: Self, step: Self, n: u64) -> Option<Self> {
        let value = i128::from(start) + i128::from(step) * i128::from(n);
        Self::try_from(value).ok()
    }

    fn near(value: Self, target: Self, _step: Self) -> bool {
        value == target
    }
}

/// Relative slack, in steps, within which a real value counts as `end`.
const REAL_SLACK: f64 = 1e-9;

impl Bound for f64 {
    const ZERO: Self = 0.0;

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn steps_between(start: Self, end: Self, step: Self) -> Option<u64> {
        f64_floor_to_u64((end - start) / step)
    }

    #[allow(clippy::cast_precision_loss)]
    fn offset(start: Self, step: Self, n: u64) -> Option<Self> {
        Some(step.mul_add(n as Self, start)).filter(|v| v.is_finite())
    }

    fn near(value: Self, target: Self, step: Self) -> bool {
        (value - target).abs() <= step.abs() * REAL_SLACK
    }
}

/// A scalar counter with inclusive bounds and a signed step.
///
/// The counter moves from `start` toward `end` by `step`. Moving past either
/// bound wraps around and is reported by returning `false`, which is how a
/// [`Pattern`](crate::pattern::Pattern) knows to carry into its next token.
///
/// Invariants, checked once by [`BoundedCounter::new`]:
/// - `step != 0` and `start != end`;
/// - with a positive step, `start <= value <= end`;
/// - with a negative step, `start >= value >= end`.
///
/// # Example
/// ```
/// use startrace::counter::BoundedCounter;
///
/// let mut counter = BoundedCounter::starting(0, 2, 1).unwrap();
/// assert!(counter.advance());
/// assert!(counter.advance());
/// assert_eq!(counter.value(), 2);
///
/// // No room left: wraps back to the start.
/// assert!(!counter.advance());
/// assert_eq!(counter.value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedCounter<T: Bound> {
    value: T,
    /// Steps taken from `start`; `value` is always `start + step * index`.
    index: u64,
    /// Index of the last value a forward cycle reaches.
    last:  u64,
    start: T,
    end:   T,
    step:  T,
}

impl<T: Bound> BoundedCounter<T> {
    /// Creates a counter positioned at `value`.
    ///
    /// # Errors
    /// - `BuildError::ZeroStep` if `step` is zero.
    /// - `BuildError::NonFinite` if any field is NaN or infinite.
    /// - `BuildError::EqualBounds` if `start == end`.
    /// - `BuildError::InvalidBounds` if the bounds disagree with the step
    ///   direction or `value` lies outside them.
    pub fn new(value: T, start: T, end: T, step: T) -> Result<Self, BuildError> {
        for (field, v) in [("value", value), ("start", start), ("end", end), ("step", step)] {
            if !v.is_finite() {
                return Err(BuildError::NonFinite { field });
            }
        }
        if step == T::ZERO {
            return Err(BuildError::ZeroStep);
        }
        if start == end {
            return Err(BuildError::EqualBounds { value: start.to_string() });
        }

        let ascending = step > T::ZERO;
        if ascending && start > end {
            return Err(BuildError::InvalidBounds { details: format!("start ({start}) must be < end ({end}) when stepping up") });
        }
        if !ascending && start < end {
            return Err(BuildError::InvalidBounds { details: format!("start ({start}) must be > end ({end}) when stepping down") });
        }

        let mut counter = Self { value: start,
                                 index: 0,
                                 last: 0,
                                 start,
                                 end,
                                 step };
        counter.last = counter.last_index().ok_or_else(|| BuildError::InvalidBounds { details: format!("too many steps of {step} between start ({start}) and end ({end})") })?;

        if !counter.contains(value) {
            return Err(BuildError::InvalidBounds { details: format!("value ({value}) must lie between start ({start}) and end ({end})") });
        }
        counter.index = counter.index_of(value).ok_or_else(|| BuildError::InvalidBounds { details: format!("value ({value}) must be start ({start}) plus a whole number of steps ({step})") })?;
        counter.value = value;

        Ok(counter)
    }

    /// Creates a counter positioned at `start`.
    ///
    /// # Errors
    /// Same as [`BoundedCounter::new`].
    pub fn starting(start: T, end: T, step: T) -> Result<Self, BuildError> {
        Self::new(start, start, end, step)
    }

    /// The current position.
    pub const fn value(&self) -> T {
        self.value
    }

    /// The first value of a cycle.
    pub const fn start(&self) -> T {
        self.start
    }

    /// The bound the counter steps toward.
    pub const fn end(&self) -> T {
        self.end
    }

    /// The signed distance moved by one advance.
    pub const fn step(&self) -> T {
        self.step
    }

    /// Moves one step toward `end`.
    ///
    /// Returns `true` if the step fit within the bounds. Otherwise the
    /// counter wraps to `start` and returns `false`.
    pub fn advance(&mut self) -> bool {
        if self.index < self.last && self.move_to(self.index + 1) {
            return true;
        }
        self.reset();
        false
    }

    /// Moves one step back toward `start`.
    ///
    /// Returns `true` if the step fit within the bounds. Otherwise the
    /// counter wraps to the last value a forward cycle reaches and returns
    /// `false`. That value is `end` whenever `end - start` is a whole number
    /// of steps.
    ///
    /// # Example
    /// ```
    /// use startrace::counter::BoundedCounter;
    ///
    /// let mut counter = BoundedCounter::starting(0, 10, 3).unwrap();
    /// assert!(!counter.retreat());
    /// assert_eq!(counter.value(), 9);
    /// assert!(counter.retreat());
    /// assert_eq!(counter.value(), 6);
    /// ```
    pub fn retreat(&mut self) -> bool {
        if self.index > 0 && self.move_to(self.index - 1) {
            return true;
        }
        if !self.move_to(self.last) {
            self.index = self.last;
            self.value = self.end;
        }
        false
    }

    /// Moves back to `start`.
    pub fn reset(&mut self) {
        self.index = 0;
        self.value = self.start;
    }

    /// Number of distinct values visited in one cycle.
    ///
    /// Returns `None` when the count does not fit in a `u64`.
    pub fn positions(&self) -> Option<u64> {
        self.last.checked_add(1)
    }

    /// Jumps to the value `index` steps from `start`, if it is in bounds.
    fn move_to(&mut self, index: u64) -> bool {
        let Some(value) = self.at(index) else {
            return false;
        };
        self.index = index;
        self.value = value;
        true
    }

    /// The value `index` steps from `start`.
    ///
    /// A real value that overshoots `end` by rounding alone is `end`.
    fn at(&self, index: u64) -> Option<T> {
        let value = T::offset(self.start, self.step, index)?;
        if self.contains(value) {
            Some(value)
        } else if T::near(value, self.end, self.step) {
            Some(self.end)
        } else {
            None
        }
    }

    /// Index of the last in-bounds value.
    ///
    /// The closed-form step count can be off by one for reals, so it is
    /// corrected against [`BoundedCounter::at`].
    fn last_index(&self) -> Option<u64> {
        let mut n = T::steps_between(self.start, self.end, self.step)?;
        while n > 0 && self.at(n).is_none() {
            n -= 1;
        }
        while let Some(next) = n.checked_add(1).filter(|&i| self.at(i).is_some()) {
            n = next;
        }
        Some(n)
    }

    /// Index of `value` if it lies on the counter's grid.
    fn index_of(&self, value: T) -> Option<u64> {
        let n = T::steps_between(self.start, value, self.step)?;
        [n, n.saturating_add(1)].into_iter()
                                .find(|&i| i <= self.last && self.at(i) == Some(value))
    }

    /// Tests whether `candidate` lies between `start` and `end` inclusive.
    fn contains(&self, candidate: T) -> bool {
        if self.step > T::ZERO {
            self.start <= candidate && candidate <= self.end
        } else {
            self.end <= candidate && candidate <= self.start
        }
    }
}
