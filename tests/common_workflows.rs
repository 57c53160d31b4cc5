//! Integration tests for common LianaAutomation workflows.
//!
//! These tests drive the facade the way a host site does: load settings,
//! show the connection status, and forward form submissions.

use lianaautomation::prelude::*;
use lianaautomation::{OPTIONS_KEY, SignedRequestBuilder};
use serde_json::{Value, json};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stored_settings(url: &str) -> MemoryConfigStore {
    MemoryConfigStore::new().with(
        OPTIONS_KEY,
        json!({
            "lianaautomation_url": url,
            "lianaautomation_realm": "ACME",
            "lianaautomation_user": "u1",
            "lianaautomation_key": "secret",
            "lianaautomation_channel": 42
        }),
    )
}

async fn api_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/pingpong"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": "pong"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    server
}

async fn import_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == "/rest/v1/import")
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

// =============================================================================
// Admin status page
// =============================================================================

#[tokio::test]
async fn test_status_page_with_stored_settings() {
    let server = api_server().await;
    let store = stored_settings(&server.uri());

    let client = AutomationClient::from_store(&store, ClientConfig::default()).unwrap();
    let status = client.probe().await;

    assert_eq!(status, ConnectionStatus::Ok);
    assert_eq!(status.indicator(), "💚 OK");
}

#[tokio::test]
async fn test_status_page_before_setup() {
    let server = api_server().await;

    let client =
        AutomationClient::from_store(&MemoryConfigStore::new(), ClientConfig::default()).unwrap();
    let status = client.probe().await;

    assert_eq!(status, ConnectionStatus::Fail);
    assert_eq!(status.indicator(), "💥Fail");
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Form forwarding
// =============================================================================

#[tokio::test]
async fn test_contact_form_from_file_settings() {
    let server = api_server().await;

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        "lianaautomation_url = \"{}/\"\n\
         lianaautomation_realm = \"ACME\"\n\
         lianaautomation_user = \"u1\"\n\
         lianaautomation_key = \"secret\"\n\
         lianaautomation_channel = \"42\"\n",
        server.uri()
    )
    .unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    let client = AutomationClient::new(settings).unwrap();

    let fields = vec![
        FormField::new("Name", "text", "Ann"),
        FormField::new("Email", "email", "ann@example.com"),
        FormField::new("Message", "textarea", "Hello"),
    ];
    let result = client
        .submit_form_event(&fields, "Contact us", "12", &NoCookies)
        .await;
    assert!(result.is_sent());

    let bodies = import_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["channel"], "42");
    assert_eq!(
        bodies[0]["data"][0]["events"][0]["items"],
        json!({
            "Name": "Ann",
            "Email": "ann@example.com",
            "Message": "Hello",
            "formtitle": "Contact us",
            "formid": "12"
        })
    );
}

#[tokio::test]
async fn test_returning_visitor_is_tracked() {
    let server = api_server().await;
    let client = AutomationClient::from_store(
        &stored_settings(&server.uri()),
        ClientConfig::default(),
    )
    .unwrap();

    // First page view issues the cookie
    let issued = TrackingCookie::new().ensure(&NoCookies);
    let set_cookie = issued.set_cookie.clone().unwrap();
    let pair = set_cookie.split(';').next().unwrap();

    // The form post carries it back
    let cookies = RequestCookies::parse(&format!("theme=dark; {}", pair));
    assert_eq!(TrackingCookie::new().ensure(&cookies).value, issued.value);

    let fields = vec![FormField::new("email", "email", "ann@example.com")];
    let result = client
        .submit_form_event(&fields, "Newsletter", "3", &cookies)
        .await;
    assert_eq!(result, SubmitResult::Sent);

    let bodies = import_bodies(&server).await;
    assert_eq!(
        bodies[0]["data"][0]["identity"],
        json!({"email": "ann@example.com", "token": issued.value})
    );
}

#[tokio::test]
async fn test_form_without_email_is_not_forwarded() {
    let server = api_server().await;
    let client = AutomationClient::from_store(
        &stored_settings(&server.uri()),
        ClientConfig::default(),
    )
    .unwrap();

    let fields = vec![FormField::new("Name", "text", "Ann")];
    let result = client
        .submit_form_event(&fields, "Contact us", "12", &NoCookies)
        .await;

    assert_eq!(result, SubmitResult::Skipped(SkipReason::NoEmail));
    assert_eq!(result.to_string(), "skipped (no-email)");
    assert!(import_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn test_incomplete_settings_report_missing_credentials() {
    let server = api_server().await;
    let store = MemoryConfigStore::new().with_settings(
        &Settings::new()
            .with_url(server.uri())
            .with_realm("ACME")
            .with_user("u1")
            .with_key("secret"),
    );
    let client = AutomationClient::from_store(&store, ClientConfig::default()).unwrap();

    let fields = vec![FormField::new("email", "email", "ann@example.com")];
    let result = client
        .submit_form_event(&fields, "Contact us", "12", &NoCookies)
        .await;

    assert_eq!(result, SubmitResult::Failed(FailureReason::MissingCredentials));
    assert_eq!(
        serde_json::to_value(result).unwrap(),
        json!({"status": "failed", "reason": "missing-credentials"})
    );
}

// =============================================================================
// Request signing
// =============================================================================

#[test]
fn test_signature_is_stable_for_fixed_input() {
    let signer = SignedRequestBuilder::new("ACME", "u1", "secret");
    let date = "2024-01-01T00:00:00+00:00".to_string();

    let first = signer.sign("POST", "v1/pingpong", r#"{"ping":"pong"}"#.into(), date.clone());
    let second = signer.sign("POST", "v1/pingpong", r#"{"ping":"pong"}"#.into(), date);

    assert_eq!(first.authorization, second.authorization);
    assert_eq!(first.signature.len(), 64);
    assert!(first.authorization.starts_with("ACME u1:"));
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_json_logs_feature_controls_log_output() {
    assert_eq!(
        lianaautomation::lianaautomation_log::JSON_OUTPUT,
        cfg!(feature = "json-logs")
    );
}
