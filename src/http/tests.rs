//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::{Error, ErrorKind};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert!(config.timeout.is_none());
    assert!(config.base_url.is_none());
    assert_eq!(
        config.default_headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );
    assert!(config.user_agent.starts_with("forumbee-export/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://forum.example.com/api/2")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://forum.example.com/api/2".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("fields", "name,path")
        .query("limit", "10")
        .header("X-Request-Id", "abc123");

    assert_eq!(
        config.query,
        vec![
            ("fields".to_string(), "name,path".to_string()),
            ("limit".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
}

#[tokio::test]
async fn test_http_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/2/categories"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("name\nGeneral\n"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api/2", mock_server.uri()))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get_with_config("/categories", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("categoryLink", "abc"))
        .and(query_param("offset", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client
        .get_text(
            "/posts",
            RequestConfig::new()
                .query("categoryLink", "abc")
                .query("offset", "1000"),
        )
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_http_client_bearer_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().base_url(mock_server.uri()).build();
    let client = HttpClient::with_auth(config, AuthConfig::bearer("test-token")).unwrap();

    let response = client.get_with_config("/secure", RequestConfig::new()).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .get_with_config("/data", RequestConfig::new().header("X-Request-Id", "req-456"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_401_error_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_with_config("/posts", RequestConfig::new()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid token");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_no_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_with_config("/flaky", RequestConfig::new()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_http_client_transport_error() {
    // Nothing listens on the reserved port 9 on loopback
    let client = HttpClient::new().unwrap();
    let err = client.get_with_config("http://127.0.0.1:9/posts", RequestConfig::new()).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();

    let response = client
        .get_with_config(&format!("{}/api/test", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test]
fn test_http_client_debug() {
    let config = HttpClientConfig::default();
    let client = HttpClient::with_auth(config, AuthConfig::bearer("secret")).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(!debug_str.contains("secret"));
}
