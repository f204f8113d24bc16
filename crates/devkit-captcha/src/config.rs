//! CAPTCHA configuration.
//!
//! A [`CaptchaConfig`] can be deserialized from any serde format or read
//! from the environment:
//!
//! | Variable                  | Field      | Default     |
//! |---------------------------|------------|-------------|
//! | `DEVKIT_CAPTCHA_KIND`     | `kind`     | `Turnstile` |
//! | `DEVKIT_CAPTCHA_SITE_KEY` | `site_key` | empty       |
//! | `DEVKIT_CAPTCHA_SECRET`   | `secret`   | empty       |
//! | `DEVKIT_CAPTCHA_ACTIVE`   | `active`   | `true`      |

use serde::{Deserialize, Serialize};

use crate::captcha::{Captcha, CaptchaKind};
use crate::error::CaptchaError;

pub const ENV_KIND: &str = "DEVKIT_CAPTCHA_KIND";
pub const ENV_SITE_KEY: &str = "DEVKIT_CAPTCHA_SITE_KEY";
pub const ENV_SECRET: &str = "DEVKIT_CAPTCHA_SECRET";
pub const ENV_ACTIVE: &str = "DEVKIT_CAPTCHA_ACTIVE";

fn default_active() -> bool {
    true
}

/// Settings for building a [`Captcha`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaConfig {
    #[serde(default)]
    pub kind: CaptchaKind,
    #[serde(default)]
    pub site_key: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            kind: CaptchaKind::default(),
            site_key: String::new(),
            secret: String::new(),
            active: default_active(),
        }
    }
}

impl CaptchaConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, CaptchaError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// ```rust
    /// use devkit_captcha::{CaptchaConfig, CaptchaKind};
    ///
    /// let config = CaptchaConfig::from_lookup(|name| match name {
    ///     "DEVKIT_CAPTCHA_KIND" => Some("Testing".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.kind, CaptchaKind::Testing);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CaptchaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(kind) = lookup(ENV_KIND) {
            config.kind = kind.trim().parse()?;
        }
        if let Some(site_key) = lookup(ENV_SITE_KEY) {
            config.site_key = site_key;
        }
        if let Some(secret) = lookup(ENV_SECRET) {
            config.secret = secret;
        }
        if let Some(active) = lookup(ENV_ACTIVE) {
            config.active = !matches!(
                active.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        Ok(config)
    }

    /// Build the [`Captcha`] this configuration describes.
    ///
    /// # Errors
    ///
    /// [`CaptchaError::MissingConfig`] if a Turnstile CAPTCHA has no secret.
    pub fn build(&self) -> Result<Captcha, CaptchaError> {
        if self.kind == CaptchaKind::Turnstile && self.secret.is_empty() {
            return Err(CaptchaError::MissingConfig("secret"));
        }

        let mut captcha = match self.kind {
            CaptchaKind::Turnstile => Captcha::turnstile(&self.site_key, &self.secret),
            CaptchaKind::Testing => Captcha::testing(&self.site_key, &self.secret),
        };
        captcha.is_active = self.active;
        Ok(captcha)
    }
}
