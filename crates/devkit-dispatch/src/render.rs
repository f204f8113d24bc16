//! Render errors.
//!
//! Rendering is the last step of a dispatch: an [`Envelope`](crate::Envelope)
//! is turned into a string by the active [`OutputMode`](crate::OutputMode).

/// Errors that can occur during rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Data serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Serialization(e.to_string())
    }
}
