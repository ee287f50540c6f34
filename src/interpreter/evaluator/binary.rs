/// Dispatch from operator to handler.
pub mod core;
/// Arithmetic on numbers, plus string and array concatenation.
pub mod scalar;
/// Equality and ordering comparisons.
pub mod comparison;
/// Short-circuiting `and` / `or`.
pub mod logic;
