//! Cloudflare Turnstile siteverify client.
//!
//! The token a browser obtained from the Turnstile widget is posted as a
//! form (`secret`, `response`, `remoteip`) to the siteverify endpoint. The
//! token is accepted only when the JSON answer carries `"success": true`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CaptchaError;

/// Default siteverify endpoint.
pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Form body for siteverify.
#[derive(Serialize)]
struct VerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    remoteip: &'a str,
}

/// Answer from siteverify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    /// Whether the token was valid. Anything but a JSON `true` reads as false.
    #[serde(default, deserialize_with = "literal_true")]
    pub success: bool,

    /// Reasons for a failed verification.
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,

    /// Time the challenge was solved.
    #[serde(default)]
    pub challenge_ts: Option<String>,

    /// Hostname of the site where the challenge was solved.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Action name passed to the widget.
    #[serde(default)]
    pub action: Option<String>,
}

fn literal_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

/// Client for the Turnstile siteverify endpoint.
#[derive(Debug, Clone)]
pub struct TurnstileClient {
    client: Client,
    endpoint: String,
}

impl Default for TurnstileClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnstileClient {
    /// Create a client for the public Cloudflare endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(SITEVERIFY_URL)
    }

    /// Create a client posting to a different endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post the token for verification and return the provider's answer.
    ///
    /// The answer is returned whether or not the token was accepted; see
    /// [`TurnstileClient::verify`] for the pass/fail form. The HTTP status is
    /// not inspected, only the body.
    ///
    /// # Errors
    ///
    /// - [`CaptchaError::Network`] if the request fails
    /// - [`CaptchaError::InvalidResponse`] if the body is not valid JSON
    pub async fn siteverify(
        &self,
        secret: &str,
        token: &str,
        ip: &str,
    ) -> Result<VerifyResponse, CaptchaError> {
        let request = VerifyRequest {
            secret,
            response: token,
            remoteip: ip,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers())
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), "siteverify answered");

        serde_json::from_str(&body).map_err(|e| {
            CaptchaError::InvalidResponse(format!("failed to parse siteverify response: {}", e))
        })
    }

    /// Verify a token, succeeding only if the provider accepted it.
    ///
    /// # Errors
    ///
    /// - [`CaptchaError::VerificationFailed`] if the token was rejected
    /// - any error from [`TurnstileClient::siteverify`]
    pub async fn verify(&self, secret: &str, token: &str, ip: &str) -> Result<(), CaptchaError> {
        let outcome = self.siteverify(secret, token, ip).await?;
        if outcome.success {
            Ok(())
        } else {
            tracing::debug!(error_codes = ?outcome.error_codes, "token rejected");
            Err(CaptchaError::VerificationFailed {
                error_codes: outcome.error_codes,
            })
        }
    }
}

fn headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Verify a token against the public Cloudflare endpoint.
///
/// ```no_run
/// # async fn check(token: &str, ip: &str) -> Result<(), devkit_captcha::CaptchaError> {
/// devkit_captcha::turnstile::verify_request("secret", token, ip).await?;
/// # Ok(())
/// # }
/// ```
pub async fn verify_request(secret: &str, token: &str, ip: &str) -> Result<(), CaptchaError> {
    TurnstileClient::new().verify(secret, token, ip).await
}
