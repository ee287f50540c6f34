/// The `Value` enum and its rendering rules.
///
/// Also defines `Bindings`, the name-to-value map a link expression is
/// evaluated against.
pub mod core;
/// Host functions callable from link expressions.
pub mod function;
