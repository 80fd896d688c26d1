//! Integration tests for the reqwest-backed transport.
//!
//! These tests run `PingClient` with the default `ReqwestTransport` against
//! a local mock server and verify what actually goes over the wire.

use std::sync::Arc;
use std::time::Duration;

use cronbeat::clients::{ReqwestTransport, Transport, TransportRequest};
use cronbeat::{BaseUrl, ClientConfig, ErrorCode, PingClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at `base_url` with instant backoff.
fn create_test_client(base_url: &str, max_retries: u32) -> PingClient {
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(base_url).unwrap())
        .max_retries(max_retries)
        .backoff_base(Duration::ZERO)
        .jitter_bound(Duration::ZERO)
        .timeout(Duration::from_secs(2))
        .user_agent("cronbeat-wire-tests/1.0")
        .transport(Arc::new(ReqwestTransport::new()))
        .build();

    PingClient::new("abc123de", config).unwrap()
}

// ============================================================================
// Wire format
// ============================================================================

#[tokio::test]
async fn test_ping_sends_post_with_standard_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", "cronbeat-wire-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "OK",
            "action": "ping",
            "job_key": "abc123de",
            "timestamp": "2026-02-25 12:00:00",
            "processing_time_ms": 8.25
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 0);
    let result = client.ping().await.unwrap();

    assert!(result.ok);
    assert_eq!(result.action, "ping");
    assert_eq!(result.job_key, "abc123de");
    assert_eq!(result.timestamp, "2026-02-25 12:00:00");
    assert!((result.processing_time_ms - 8.25).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_trailing_slash_base_url_builds_clean_paths() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"action": "start"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&format!("{}//", server.uri()), 0);
    let result = client.start().await.unwrap();

    assert_eq!(result.action, "start");
}

#[tokio::test]
async fn test_lifecycle_actions_hit_expected_paths() {
    let server = MockServer::start().await;

    for endpoint in ["/ping/abc123de/end/success", "/ping/abc123de/end/fail"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": "end",
                "next_expected": "2026-02-26 02:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = create_test_client(&server.uri(), 0);

    let ok = client.success().await.unwrap();
    let failed = client.end("fail").await.unwrap();

    assert_eq!(ok.next_expected.as_deref(), Some("2026-02-26 02:00:00"));
    assert_eq!(failed.action, "end");
}

#[tokio::test]
async fn test_progress_sends_message_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de/progress/40"))
        .and(body_json(json!({"message": "indexing"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"action": "progress"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de/progress"))
        .and(body_json(json!({"message": "still indexing"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"action": "progress"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 0);

    client.progress(40u64, Some("indexing")).await.unwrap();
    client
        .progress(None::<u64>, Some("still indexing"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_lifecycle_without_body_sends_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 0);
    let result = client.ping().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert_eq!(result.raw, json!({}));
}

// ============================================================================
// Errors and retries
// ============================================================================

#[tokio::test]
async fn test_not_found_returns_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "req-404")
                .set_body_json(json!({"status": "error", "message": "Job not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 3);
    let error = client.ping().await.unwrap_err();
    let remote = error.as_remote().unwrap();

    assert_eq!(remote.code, ErrorCode::NotFound);
    assert_eq!(remote.http_status, Some(404));
    assert!(!remote.retryable);
    assert_eq!(remote.message, "Job not found");
    assert_eq!(remote.request_id.as_deref(), Some("req-404"));
}

#[tokio::test]
async fn test_rate_limit_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de/start"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "Slow down"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"action": "start"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 1);
    let result = client.start().await.unwrap();

    assert_eq!(result.action, "start");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_error_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ping/abc123de"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let client = create_test_client(&server.uri(), 2);
    let error = client.ping().await.unwrap_err();
    let remote = error.as_remote().unwrap();

    assert_eq!(remote.code, ErrorCode::ServerError);
    assert_eq!(remote.http_status, Some(503));
    assert!(remote.retryable);
    assert_eq!(remote.raw, json!({"message": "Invalid JSON response"}));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 1 is reserved and nothing listens on it in test environments.
    let client = create_test_client("http://127.0.0.1:1", 1);

    let error = client.ping().await.unwrap_err();
    let remote = error.as_remote().unwrap();

    assert_eq!(remote.code, ErrorCode::NetworkError);
    assert!(remote.retryable);
    assert!(remote.http_status.is_none());
    assert!(std::error::Error::source(remote).is_some());
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new();
    let request = TransportRequest::post(
        format!("{}/ping/abc123de", server.uri()),
        Duration::from_millis(50),
    );

    let error = transport.execute(request).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::NetworkError);
    assert!(error.retryable);
    assert!(error.message.contains("timed out after 50ms"));
}

#[tokio::test]
async fn test_transport_lowercases_response_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Custom-Header", "value")
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new();
    let response = transport
        .execute(TransportRequest::post(server.uri(), Duration::from_secs(2)))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, "{}");
    assert_eq!(
        response.headers.get("x-custom-header"),
        Some(&"value".to_string())
    );
}
