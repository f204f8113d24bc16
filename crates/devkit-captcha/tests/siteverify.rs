//! Turnstile verification against a mock siteverify server.

use devkit_captcha::{Captcha, CaptchaError, TurnstileClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITEVERIFY_PATH: &str = "/turnstile/v0/siteverify";

async fn server_answering(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITEVERIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> TurnstileClient {
    TurnstileClient::with_endpoint(format!("{}{}", server.uri(), SITEVERIFY_PATH))
}

#[tokio::test]
async fn posts_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SITEVERIFY_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("secret=s3cret"))
        .and(body_string_contains("response=tok"))
        .and(body_string_contains("remoteip=203.0.113.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .verify("s3cret", "tok", "203.0.113.7")
        .await
        .unwrap();
}

#[tokio::test]
async fn success_true_passes() {
    let server = server_answering(json!({
        "success": true,
        "challenge_ts": "2024-03-15T09:30:00Z",
        "hostname": "example.com",
        "error-codes": [],
    }))
    .await;

    let outcome = client_for(&server)
        .siteverify("secret", "token", "127.0.0.1")
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.hostname.as_deref(), Some("example.com"));
}

#[tokio::test]
async fn success_false_is_rejected_with_codes() {
    let server = server_answering(json!({
        "success": false,
        "error-codes": ["invalid-input-response"],
    }))
    .await;

    let err = client_for(&server)
        .verify("secret", "bad", "127.0.0.1")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "verification failed");
    match err {
        CaptchaError::VerificationFailed { error_codes } => {
            assert_eq!(error_codes, vec!["invalid-input-response"]);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_success_field_is_rejected() {
    let server = server_answering(json!({ "hostname": "example.com" })).await;
    let err = client_for(&server)
        .verify("secret", "token", "")
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}

#[tokio::test]
async fn non_boolean_success_is_rejected() {
    for success in [json!(null), json!("true"), json!(1)] {
        let server = server_answering(json!({ "success": success })).await;
        let err = client_for(&server)
            .verify("secret", "token", "")
            .await
            .unwrap_err();
        assert!(err.is_rejection(), "{:?}", err);
    }
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .verify("secret", "token", "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, CaptchaError::InvalidResponse(_)));
}

#[tokio::test]
async fn body_decides_even_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    assert!(client_for(&server)
        .verify("secret", "token", "127.0.0.1")
        .await
        .is_ok());
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    // Nothing listens on port 1.
    let client = TurnstileClient::with_endpoint("http://127.0.0.1:1/siteverify");

    let err = client
        .verify("secret", "token", "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, CaptchaError::Network(_)));
    assert!(!err.is_rejection());
}

#[tokio::test]
async fn turnstile_captcha_uses_its_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("secret=from-captcha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let captcha = Captcha::turnstile("site", "from-captcha");
    captcha
        .verify_with(&client_for(&server), "token", "127.0.0.1")
        .await
        .unwrap();
}

#[tokio::test]
async fn testing_captcha_never_calls_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .expect(0)
        .mount(&server)
        .await;

    let captcha = Captcha::testing("sitekey", "secret");
    captcha
        .verify_with(&client_for(&server), "token", "ip")
        .await
        .unwrap();
}
