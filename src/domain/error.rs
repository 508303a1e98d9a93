//! Domain error types

use thiserror::Error;

use super::schema::SchemaFormat;

/// The supplied document could not be interpreted as a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {format} schema: {message}")]
pub struct SchemaParseError {
    pub format: SchemaFormat,
    pub message: String,
}

impl SchemaParseError {
    pub fn new(format: SchemaFormat, message: impl std::fmt::Display) -> Self {
        Self {
            format,
            message: message.to_string(),
        }
    }
}

/// A field's `validation` rule is not a valid regular expression.
#[derive(Debug, Clone, Error)]
#[error("Invalid validation pattern '{rule}': {source}")]
pub struct PatternCompileError {
    pub rule: String,
    #[source]
    pub source: regex::Error,
}
