//! Output mode control for dispatch.
//!
//! [`OutputMode`] is the formatter strategy: it decides how a result
//! envelope is turned into the string written to the terminal. There are
//! exactly two strategies, so the mode is a closed enum and formatting is a
//! `match` rather than a trait object.

use serde::Serialize;
use std::fmt::Display;

use crate::render::RenderError;

/// Controls how output is rendered.
///
/// # Variants
///
/// - `Text` - The value's plain textual representation (default)
/// - `Json` - Serialize the value as JSON
///
/// The dispatcher starts in `Text` and switches to `Json` when it sees the
/// `-json` / `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Plain text via `Display`
    #[default]
    Text,
    /// Serialize data as JSON
    Json,
}

impl OutputMode {
    /// Returns true if this is a structured output mode.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json)
    }

    /// Short name of the strategy: `"text"` or `"json"`.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputMode::Text => "text",
            OutputMode::Json => "json",
        }
    }

    /// Formats a value with this strategy.
    ///
    /// `Json` keeps the field order the value's `Serialize` impl defines.
    pub fn format<V>(&self, value: &V) -> Result<String, RenderError>
    where
        V: Serialize + Display + ?Sized,
    {
        match self {
            OutputMode::Text => Ok(value.to_string()),
            OutputMode::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    /// Returns the mode selected by a global flag token, if the token is one.
    pub fn from_flag(token: &str) -> Option<OutputMode> {
        match token {
            "-json" | "--json" => Some(OutputMode::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}
