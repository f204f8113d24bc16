//! CAPTCHA descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaptchaError;
use crate::turnstile::TurnstileClient;

/// Supported CAPTCHA providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaptchaKind {
    /// Cloudflare Turnstile, verified over HTTP.
    #[default]
    Turnstile,
    /// Accepts every token. For development and tests.
    Testing,
}

impl CaptchaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptchaKind::Turnstile => "Turnstile",
            CaptchaKind::Testing => "Testing",
        }
    }
}

impl fmt::Display for CaptchaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptchaKind {
    type Err = CaptchaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Turnstile" => Ok(CaptchaKind::Turnstile),
            "Testing" => Ok(CaptchaKind::Testing),
            other => Err(CaptchaError::UnsupportedKind(other.to_string())),
        }
    }
}

/// A configured CAPTCHA.
///
/// `site_key` is public and goes into the page rendering the widget;
/// `secret` stays on the server. `is_active` tells templates whether to
/// render the widget at all. Verification does not consult it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub is_active: bool,
    pub site_key: String,
    pub secret: String,
    pub kind: CaptchaKind,
}

impl Captcha {
    /// An active Turnstile CAPTCHA.
    pub fn turnstile(site_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(CaptchaKind::Turnstile, site_key, secret)
    }

    /// An active CAPTCHA that accepts every token.
    pub fn testing(site_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(CaptchaKind::Testing, site_key, secret)
    }

    fn new(kind: CaptchaKind, site_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            is_active: true,
            site_key: site_key.into(),
            secret: secret.into(),
            kind,
        }
    }

    /// Verify a token submitted from `ip`.
    ///
    /// ```rust
    /// use devkit_captcha::Captcha;
    ///
    /// # #[tokio::main] async fn main() {
    /// let captcha = Captcha::testing("sitekey", "secret");
    /// assert!(captcha.verify("token", "203.0.113.7").await.is_ok());
    /// # }
    /// ```
    pub async fn verify(&self, token: &str, ip: &str) -> Result<(), CaptchaError> {
        self.verify_with(&TurnstileClient::new(), token, ip).await
    }

    /// Verify a token using the given Turnstile client.
    pub async fn verify_with(
        &self,
        client: &TurnstileClient,
        token: &str,
        ip: &str,
    ) -> Result<(), CaptchaError> {
        tracing::debug!(kind = %self.kind, "verifying captcha token");
        match self.kind {
            CaptchaKind::Turnstile => client.verify(&self.secret, token, ip).await,
            CaptchaKind::Testing => Ok(()),
        }
    }
}
