//! Server-side CAPTCHA verification.
//!
//! A [`Captcha`] pairs the public site key shown to the browser with the
//! server secret, and verifies the token the browser sends back.
//!
//! Two kinds exist:
//!
//! - [`CaptchaKind::Turnstile`] posts the token to Cloudflare's siteverify
//!   endpoint (see [`turnstile`]).
//! - [`CaptchaKind::Testing`] accepts every token.
//!
//! # Example
//!
//! ```no_run
//! use devkit_captcha::{Captcha, CaptchaConfig};
//!
//! # async fn handle(form_token: &str, client_ip: &str) -> Result<(), devkit_captcha::CaptchaError> {
//! let captcha: Captcha = CaptchaConfig::from_env()?.build()?;
//! if let Err(err) = captcha.verify(form_token, client_ip).await {
//!     if err.is_rejection() {
//!         // show "Verification failed" on the form
//!     }
//!     return Err(err);
//! }
//! # Ok(())
//! # }
//! ```

mod captcha;
mod config;
mod error;
pub mod turnstile;

pub use captcha::{Captcha, CaptchaKind};
pub use config::{CaptchaConfig, ENV_ACTIVE, ENV_KIND, ENV_SECRET, ENV_SITE_KEY};
pub use error::CaptchaError;
pub use turnstile::{TurnstileClient, VerifyResponse};
