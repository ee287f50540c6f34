/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors,
/// and for resolving signed indices against a length.
///
/// All fallible functions return a `Result` or `Option`, which is `Ok`/`Some`
/// only when the conversion is lossless and valid.
pub mod num;
