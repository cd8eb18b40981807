//! Integration tests for the HTTP client functionality.
//!
//! These tests run the client against a mock server and verify payload
//! decoding, fallback substitution, failure classification, and
//! notification behavior.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use nemo_api::clients::{
    ErrorKind, HttpClient, HttpMethod, HttpRequest, Notification, Notifier, ToastNotifier,
    CSRF_HEADER, FORBIDDEN_MESSAGE, NETWORK_FAILURE_MESSAGE, NOT_FOUND_MESSAGE,
    UNAUTHORIZED_MESSAGE,
};
use nemo_api::{ApiUrl, CsrfToken, NemoConfig, Session};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Notifier that records every notification it receives.
#[derive(Debug, Default)]
struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().unwrap().push(notification);
    }
}

fn config_for(uri: &str) -> NemoConfig {
    NemoConfig::builder()
        .api_url(ApiUrl::new(uri).unwrap())
        .build()
        .unwrap()
}

fn client_with(uri: &str, notifier: Arc<dyn Notifier>) -> HttpClient {
    let session = Session::new(Some(CsrfToken::new("test-csrf").unwrap()));
    HttpClient::new(&config_for(uri), &session, notifier)
}

/// Returns the base URL of a port nothing listens on.
fn unreachable_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_get_returns_decoded_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/project/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());
    let url = format!("{}/api/v1/dashboard/project/3/", server.uri());

    let payload = client.get(&url, true, None).await.unwrap();

    assert_eq!(payload, Some(json!({"a": 1})));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_no_content_yields_none_or_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let url = format!("{}/api/v1/dashboard/project/3/goal/1/", server.uri());

    let request = HttpRequest::builder(HttpMethod::Delete, url.clone())
        .build()
        .unwrap();
    assert_eq!(client.execute(request).await.unwrap(), None);

    let payload = client
        .get(&url, true, Some(json!({"x": null})))
        .await
        .unwrap();
    assert_eq!(payload, Some(json!({"x": null})));
}

#[tokio::test]
async fn test_created_payload_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dashboard/project/1/goal/"))
        .and(body_json(json!({"title": "Reach level 3"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 8})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let request = HttpRequest::builder(
        HttpMethod::Post,
        format!("{}/api/v1/dashboard/project/1/goal/", server.uri()),
    )
    .body(json!({"title": "Reach level 3"}))
    .build()
    .unwrap();

    assert_eq!(client.execute(request).await.unwrap(), Some(json!({"id": 8})));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header(CSRF_HEADER, "test-csrf"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let url = format!("{}/api/v1/dashboard/user/", server.uri());

    assert!(client.get(&url, true, None).await.is_ok());
}

#[tokio::test]
async fn test_execute_as_deserializes_payload() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Counter {
        count: u64,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 42})))
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let request = HttpRequest::get(format!("{}/api/v1/dashboard/visits/", server.uri()));

    let counter: Option<Counter> = client.execute_as(request).await.unwrap();
    assert_eq!(counter, Some(Counter { count: 42 }));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_bad_request_keeps_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"time": ["invalid"]})))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());
    let request = HttpRequest::builder(
        HttpMethod::Post,
        format!("{}/api/v1/devops-metrics/project/1/changelist/", server.uri()),
    )
    .body(json!({"time": "yesterday"}))
    .build()
    .unwrap();

    let error = client.execute(request).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::BadRequest);
    assert_eq!(error.payload, Some(json!({"time": ["invalid"]})));
    assert_eq!(error.field_errors()["time"], vec!["invalid"]);
    assert_eq!(notifier.messages(), vec!["Bad Request. time: invalid"]);
}

#[tokio::test]
async fn test_fixed_messages_per_status() {
    let server = MockServer::start().await;
    for (status, route) in [(401_u16, "/a/"), (403, "/b/"), (404, "/c/")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());

    let unauthorized = client
        .get(&format!("{}/a/", server.uri()), true, None)
        .await
        .unwrap_err();
    let forbidden = client
        .get(&format!("{}/b/", server.uri()), true, None)
        .await
        .unwrap_err();
    let not_found = client
        .get(&format!("{}/c/", server.uri()), true, None)
        .await
        .unwrap_err();

    assert_eq!(unauthorized.kind, ErrorKind::Unauthorized);
    assert_eq!(unauthorized.message, UNAUTHORIZED_MESSAGE);
    assert_eq!(forbidden.message, FORBIDDEN_MESSAGE);
    assert_eq!(not_found.message, NOT_FOUND_MESSAGE);
    assert_eq!(notifier.messages().len(), 3);
}

#[tokio::test]
async fn test_server_error_uses_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "Maintenance window"})),
        )
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let error = client
        .get(&format!("{}/api/v1/dashboard/project/", server.uri()), true, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::OtherHttp { status: 503 });
    assert_eq!(error.message, "Maintenance window (Status 503)");
    assert_eq!(error.status(), Some(503));
}

#[tokio::test]
async fn test_invalid_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = client_with(&server.uri(), Arc::new(RecordingNotifier::default()));
    let error = client
        .get(&format!("{}/x/", server.uri()), true, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Decode);
}

#[tokio::test]
async fn test_fallback_replaces_failure_after_notifying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());

    let payload = client
        .get(
            &format!("{}/x/", server.uri()),
            true,
            Some(json!({"results": []})),
        )
        .await
        .unwrap();

    assert_eq!(payload, Some(json!({"results": []})));
    assert_eq!(notifier.messages(), vec!["Unexpected server error (500)"]);
}

#[tokio::test]
async fn test_notify_off_never_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());

    let error = client
        .get(&format!("{}/missing/", server.uri()), false, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::NotFound);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notify_off_network_failure_is_silent() {
    let uri = unreachable_uri();
    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&uri, notifier.clone());

    let error = client
        .get(&format!("{uri}/api/v1/dashboard/user/"), false, None)
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Network);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notify_off_bad_request_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"name": ["required"]})))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());
    let request = HttpRequest::builder(
        HttpMethod::Post,
        format!("{}/api/v1/dashboard/project/", server.uri()),
    )
    .body(json!({}))
    .notify_on_error(false)
    .build()
    .unwrap();

    let error = client.execute(request).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::BadRequest);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notify_off_decode_failure_is_silent() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Counter {
        count: u64,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": "many"})))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());
    let request = HttpRequest::get(format!("{}/api/v1/dashboard/visits/", server.uri()))
        .with_notify_on_error(false);

    let error = client.execute_as::<Counter>(request).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Decode);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_notify_off_fallback_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = client_with(&server.uri(), notifier.clone());

    let payload = client
        .get(
            &format!("{}/x/", server.uri()),
            false,
            Some(json!({"results": []})),
        )
        .await
        .unwrap();

    assert_eq!(payload, Some(json!({"results": []})));
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_network_failure_notifies_once_when_repeated() {
    let uri = unreachable_uri();
    let toasts = Arc::new(ToastNotifier::new());
    let client = client_with(&uri, toasts.clone());
    let url = format!("{uri}/api/v1/dashboard/user/");

    for _ in 0..2 {
        let error = client.get(&url, true, None).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Network);
        assert_eq!(error.message, NETWORK_FAILURE_MESSAGE);
        assert!(error.response.is_none());
    }

    assert_eq!(
        toasts.active_messages(),
        vec![NETWORK_FAILURE_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn test_identical_failures_share_one_toast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let toasts = Arc::new(ToastNotifier::new());
    let client = client_with(&server.uri(), toasts.clone());
    let url = format!("{}/api/v1/dashboard/project/1/", server.uri());

    let (first, second) = tokio::join!(client.get(&url, true, None), client.get(&url, true, None));

    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(toasts.active_messages(), vec![FORBIDDEN_MESSAGE.to_string()]);
}
