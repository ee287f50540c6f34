use thiserror::Error;

/// Represents all errors that can occur while reading or writing a
/// declarative description.
///
/// Each variant names the field involved so that malformed configuration can
/// be traced back to its source.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The description has no `type` discriminator.
    #[error("Descriptor is missing its 'type' field.")]
    MissingType,
    /// The `type` discriminator names no known token kind.
    #[error("Unknown token type '{name}'. Valid types are: const, list, range, time, link.")]
    UnknownType {
        /// The unrecognized type name.
        name: String,
    },
    /// A required field is absent.
    #[error("Descriptor of type '{kind}' is missing required field '{field}'.")]
    MissingField {
        /// The token kind being described.
        kind:  &'static str,
        /// The missing field.
        field: &'static str,
    },
    /// A field is present but has the wrong shape.
    #[error("Field '{field}' must be {expected}.")]
    InvalidField {
        /// The offending field.
        field:    String,
        /// What the field should have been.
        expected: &'static str,
    },
    /// A value cannot be represented in JSON.
    #[error("Field '{field}' holds a {found} which cannot be serialized.")]
    Unserializable {
        /// Where the value was found.
        field: String,
        /// Type name of the value.
        found: &'static str,
    },
    /// The input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
