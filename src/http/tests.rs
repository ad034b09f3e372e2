//! Tests for the HTTP request module

use super::*;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_request_client_config_default() {
    let config = RequestClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("destination-kit/"));
}

#[test]
fn test_request_client_config_builder() {
    let config = RequestClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .header("Authorization", "Basic abc")
        .json(serde_json::json!({"key": "value"}))
        .no_throw_http_errors();

    assert_eq!(
        config.headers.get("Authorization"),
        Some(&"Basic abc".to_string())
    );
    assert!(config.body.is_some());
    assert!(!config.throw_http_errors);
}

#[tokio::test]
async fn test_post_json_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/exec"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .and(body_json(serde_json::json!({"sql": "SELECT 1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = RequestClient::new();
    let config = RequestConfig::new()
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .json(serde_json::json!({"sql": "SELECT 1"}));

    let body: serde_json::Value = client
        .post_json(&format!("{}/api/v2/exec", mock_server.uri()), config)
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_throw_http_errors_raises_on_4xx() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fail"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let client = RequestClient::new();
    let err = client
        .post(
            &format!("{}/api/fail", mock_server.uri()),
            RequestConfig::new().json(serde_json::json!({})),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("unauthorized"));
}

#[tokio::test]
async fn test_no_throw_http_errors_hands_back_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/exec"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"ok": false, "error": "boom"})),
        )
        .mount(&mock_server)
        .await;

    let client = RequestClient::new();
    let body: serde_json::Value = client
        .post_json(
            &format!("{}/api/exec", mock_server.uri()),
            RequestConfig::new()
                .json(serde_json::json!({}))
                .no_throw_http_errors(),
        )
        .await
        .unwrap();

    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "boom");
}

#[tokio::test]
async fn test_default_headers_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .mount(&mock_server)
        .await;

    let client = RequestClient::with_config(
        RequestClientConfig::builder()
            .header("Content-Type", "application/json")
            .build(),
    );

    let response = client
        .post(
            &format!("{}/graphql", mock_server.uri()),
            RequestConfig::new().json(serde_json::json!({"query": "{}"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}
