//! Error handling for WindKit
//!
//! Layer errors raised while coercing schedule entries into layer
//! records. Loaders and planners wrap them in their own error types.

use thiserror::Error;

/// Layer construction error type
///
/// Raised while coercing the raw fields of a schedule entry into the
/// declared numeric or boolean kind of a layer record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerError {
    /// A field could not be converted to its declared kind
    #[error("Cannot convert field '{field}' value {value} to {expected}")]
    TypeConversion {
        /// The schema name of the field.
        field: String,
        /// The offending raw value, rendered as JSON.
        value: String,
        /// The kind the field must be coerced to.
        expected: &'static str,
    },

    /// A required field is absent from the layer entry
    #[error("Missing layer field '{field}'")]
    MissingField {
        /// The schema name of the missing field.
        field: String,
    },

    /// The layer entry is not a JSON object
    #[error("Layer entry must be an object, got {found}")]
    NotAnObject {
        /// The raw entry, rendered as JSON.
        found: String,
    },

    /// The `windType` tag names no known wind
    #[error("Unknown wind type: {wind_type}")]
    UnknownWindType {
        /// The tag as written in the schedule.
        wind_type: String,
    },
}
