use crate::error::EvalError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use startrace::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside safe range
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Promotes an integer operand to `f64` for mixed arithmetic.
///
/// ## Errors
/// Returns `EvalError::Overflow` when the integer cannot be represented
/// exactly.
pub fn promote_i64(value: i64) -> Result<f64, EvalError> {
    i64_to_f64_checked(value, EvalError::Overflow)
}

/// Converts a non-negative, finite `f64` to `u64` by truncating toward zero.
///
/// Used to count whole steps between two real bounds. Returns `None` for
/// negative, non-finite or unsafe values.
///
/// ## Example
/// ```
/// use startrace::util::num::f64_floor_to_u64;
///
/// assert_eq!(f64_floor_to_u64(4.9), Some(4));
/// assert_eq!(f64_floor_to_u64(-1.0), None);
/// assert_eq!(f64_floor_to_u64(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn f64_floor_to_u64(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value.floor() as u64)
}

/// Resolves a possibly negative index against a length.
///
/// Non-negative indices count from the front and negative indices count from
/// the back, so `-1` is the last element.
///
/// ## Errors
/// Returns `EvalError::IndexOutOfBounds` when the index does not address an
/// element.
///
/// ## Example
/// ```
/// use startrace::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3).unwrap(), 0);
/// assert_eq!(resolve_index(-1, 3).unwrap(), 2);
/// assert!(resolve_index(3, 3).is_err());
/// assert!(resolve_index(-4, 3).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize) -> Result<usize, EvalError> {
    let out_of_bounds = || EvalError::IndexOutOfBounds { len,
                                                         found: index };
    let len_i64 = i64::try_from(len).map_err(|_| out_of_bounds())?;
    let resolved = if index < 0 { len_i64.checked_add(index) } else { Some(index) };

    match resolved {
        Some(i) if (0..len_i64).contains(&i) => usize::try_from(i).map_err(|_| out_of_bounds()),
        _ => Err(out_of_bounds()),
    }
}
