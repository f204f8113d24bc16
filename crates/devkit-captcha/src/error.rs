//! Error types for CAPTCHA verification.

/// Errors that can occur while configuring or verifying a CAPTCHA.
#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    /// The provider answered but did not confirm the token.
    #[error("verification failed")]
    VerificationFailed {
        /// Error codes reported by the provider, if any.
        error_codes: Vec<String>,
    },

    /// The CAPTCHA kind is not one this crate knows.
    #[error("Captcha type not supported: {0}")]
    UnsupportedKind(String),

    /// The request could not be sent or its body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The provider's answer was not the expected JSON document.
    #[error("invalid verification response: {0}")]
    InvalidResponse(String),

    /// A configuration value required for the chosen kind is missing.
    #[error("missing captcha configuration: {0}")]
    MissingConfig(&'static str),
}

impl CaptchaError {
    /// Returns true if the token itself was rejected, as opposed to the
    /// verification not completing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CaptchaError::VerificationFailed { .. })
    }
}

impl From<reqwest::Error> for CaptchaError {
    fn from(err: reqwest::Error) -> Self {
        CaptchaError::Network(err.to_string())
    }
}
