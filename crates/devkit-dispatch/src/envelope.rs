//! Result envelopes.
//!
//! An [`Envelope`] is what a command action produces: a closed set of
//! result shapes that know how to render themselves through an
//! [`OutputMode`].
//!
//! | Variant | JSON shape | Text shape |
//! |---------|------------|------------|
//! | `Message` | raw text, never formatted | raw text |
//! | `List` | `{"title", "items": [..]}` | title, then `key: value` lines |
//! | `Details` | `{"title", "item": {..}}` | title, then `key: value` lines |
//! | `Error` | `{"error"}` | error text |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::output::OutputMode;
use crate::render::RenderError;

/// A single record in a list or details envelope.
pub type Record = BTreeMap<String, String>;

/// What a command action returns.
///
/// Envelopes are built fresh per invocation, rendered once and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// Plain message, rendered verbatim regardless of output mode
    Message { message: String },
    /// A titled collection of records
    List { title: String, items: Vec<Record> },
    /// A titled single record
    Details { title: String, item: Record },
    /// An error carried as data
    Error { error: String },
}

impl Envelope {
    /// Creates a message envelope.
    pub fn message(text: impl Into<String>) -> Self {
        Envelope::Message {
            message: text.into(),
        }
    }

    /// Creates a list envelope.
    pub fn list(title: impl Into<String>, items: Vec<Record>) -> Self {
        Envelope::List {
            title: title.into(),
            items,
        }
    }

    /// Creates a details envelope.
    pub fn details(title: impl Into<String>, item: Record) -> Self {
        Envelope::Details {
            title: title.into(),
            item,
        }
    }

    /// Creates an error envelope.
    pub fn error(text: impl Into<String>) -> Self {
        Envelope::Error { error: text.into() }
    }

    /// Returns true if this is a message envelope.
    pub fn is_message(&self) -> bool {
        matches!(self, Envelope::Message { .. })
    }

    /// Returns true if this is a list envelope.
    pub fn is_list(&self) -> bool {
        matches!(self, Envelope::List { .. })
    }

    /// Returns true if this is a details envelope.
    pub fn is_details(&self) -> bool {
        matches!(self, Envelope::Details { .. })
    }

    /// Returns true if this is an error envelope.
    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error { .. })
    }

    /// Renders the envelope with the given output mode.
    ///
    /// `Message` ignores the mode and returns its text unchanged.
    pub fn render(&self, mode: OutputMode) -> Result<String, RenderError> {
        match self {
            Envelope::Message { message } => Ok(message.clone()),
            other => mode.format(other),
        }
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Envelope::Message { message } => f.write_str(message),
            Envelope::Error { error } => f.write_str(error),
            Envelope::List { title, items } => {
                f.write_str(title)?;
                for (key, value) in items.iter().flatten() {
                    write!(f, "\n{}: {}", key, value)?;
                }
                Ok(())
            }
            Envelope::Details { title, item } => {
                f.write_str(title)?;
                for (key, value) in item {
                    write!(f, "\n{}: {}", key, value)?;
                }
                Ok(())
            }
        }
    }
}

/// Builds a [`Record`] from key/value pairs.
///
/// ```rust
/// use devkit_dispatch::record;
///
/// let user = record([("id", "7"), ("email", "max@example.com")]);
/// assert_eq!(user["id"], "7");
/// ```
pub fn record<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
