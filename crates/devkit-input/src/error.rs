//! Error types for input binding.

use std::io;

/// Errors that can occur while binding input onto a record.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Reading the prompt answer failed.
    #[error("error reading input: {0}")]
    PromptFailed(#[source] io::Error),

    /// Input ended before an answer was given (Ctrl+D).
    #[error("error reading input: input closed before a value was entered")]
    PromptCancelled,

    /// The value could not be coerced into the field's type.
    #[error("Failed to parse field '{name}': {reason}")]
    ParseError { name: String, reason: String },

    /// The field's type is outside the supported set.
    #[error("unsupported type: {type_name} (field '{field}')")]
    UnsupportedType {
        field: String,
        type_name: &'static str,
    },
}

impl InputError {
    /// Create a parse error.
    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from the terminal rather than the value.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::PromptFailed(_) | Self::PromptCancelled)
    }
}
