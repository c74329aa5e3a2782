//! Integration tests for the HTTP layer.
//!
//! These tests verify request building, URL and header construction, and
//! how the transport classifies answers, without going through the resource
//! operations.

use ghost_admin::auth::{sign_admin_token, AdminToken};
use ghost_admin::clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError, MultipartForm,
    RequestBody, Transport,
};
use ghost_admin::{AdminApiKey, GhostConfig, SiteUrl};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_key() -> AdminApiKey {
    AdminApiKey::new(format!("6489ea1c0a:{}", "0f".repeat(32))).unwrap()
}

/// Creates a client for the given site URL.
fn create_client(site: &str) -> HttpClient {
    let config = GhostConfig::builder()
        .site_url(SiteUrl::new(site).unwrap())
        .admin_api_key(test_key())
        .timeout(Duration::from_secs(5))
        .user_agent_prefix("ghost-admin-tests")
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

// ============================================================================
// Request building
// ============================================================================

#[test]
fn test_request_without_token_is_rejected() {
    let result = HttpRequest::builder(HttpMethod::Get, "posts/").build();

    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingAuthorization { .. })
    ));
}

#[test]
fn test_write_without_body_is_rejected() {
    let token = sign_admin_token(&test_key(), 1_700_000_000);

    for http_method in [HttpMethod::Post, HttpMethod::Put] {
        let result = HttpRequest::builder(http_method, "posts/p1/")
            .admin_token(&token)
            .build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { .. })
        ));
    }
}

#[test]
fn test_request_with_all_options() {
    let token = sign_admin_token(&test_key(), 1_700_000_000);
    let request = HttpRequest::builder(HttpMethod::Put, "posts/p1/")
        .query_param("source", "html")
        .header("X-Request-Origin", "tests")
        .admin_token(&token)
        .json_body(json!({"posts": [{"title": "T", "updated_at": "u"}]}))
        .build()
        .unwrap();

    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.path_and_query(), "posts/p1/?source=html");
    assert_eq!(request.header("x-request-origin"), Some("tests"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(
        request.header("Authorization").map(str::to_string),
        Some(token.authorization_value())
    );
}

#[test]
fn test_multipart_request_takes_content_type_from_form() {
    let request = HttpRequest::builder(HttpMethod::Post, "images/upload/")
        .admin_token(&sign_admin_token(&test_key(), 1_700_000_000))
        .multipart(MultipartForm::with_boundary("B0").file("file", "a.gif", "image/gif", vec![1]))
        .build()
        .unwrap();

    assert!(matches!(request.body, Some(RequestBody::Multipart(_))));
    assert_eq!(
        request.header("content-type"),
        Some("multipart/form-data; boundary=B0")
    );
    assert!(request.json_body().is_none());
}

#[test]
fn test_independent_clients_for_different_sites() {
    let client1 = create_client("https://one.example.com");
    let client2 = create_client("https://two.example.com/blog/");

    assert_eq!(client1.base_url(), "https://one.example.com/ghost/api/admin");
    assert_eq!(
        client2.base_url(),
        "https://two.example.com/blog/ghost/api/admin"
    );
    assert!(client1
        .default_headers()
        .get("User-Agent")
        .unwrap()
        .starts_with("ghost-admin-tests | "));
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_transport_sends_headers_query_and_body() {
    let server = MockServer::start().await;
    let token = AdminToken::issue(&test_key());

    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/posts/"))
        .and(query_param("source", "html"))
        .and(header("authorization", token.authorization_value().as_str()))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"posts": [{"title": "T"}]})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Content-Version", "v5.82")
                .set_body_json(json!({"posts": [{"id": "p1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let request = HttpRequest::builder(HttpMethod::Post, "posts/")
        .query_param("source", "html")
        .admin_token(&token)
        .json_body(json!({"posts": [{"title": "T"}]}))
        .build()
        .unwrap();

    let response = client.execute(&request).await.unwrap();

    assert_eq!(response.code, 201);
    assert!(response.is_ok());
    assert_eq!(response.header("content-version"), Some("v5.82"));
    assert_eq!(response.body, json!({"posts": [{"id": "p1"}]}));
}

#[tokio::test]
async fn test_empty_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/p1/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let request = HttpRequest::builder(HttpMethod::Get, "posts/p1/")
        .admin_token(&AdminToken::issue(&test_key()))
        .build()
        .unwrap();

    match client.execute(&request).await {
        Err(HttpError::Decode { code, body, .. }) => {
            assert_eq!(code, 200);
            assert!(body.is_empty());
        }
        other => panic!("Expected a decode failure, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_without_body_sends_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let request = HttpRequest::builder(HttpMethod::Get, "posts/")
        .admin_token(&AdminToken::issue(&test_key()))
        .build()
        .unwrap();

    let response = client.execute(&request).await.unwrap();

    assert_eq!(response.body, json!({"posts": []}));
}

#[tokio::test]
async fn test_rejection_keeps_status_and_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"errors":[{"message":"Invalid token","type":"UnauthorizedError","id":"ref-9"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let request = HttpRequest::builder(HttpMethod::Get, "posts/")
        .admin_token(&AdminToken::issue(&test_key()))
        .build()
        .unwrap();

    match client.execute(&request).await {
        Err(HttpError::Response(e)) => {
            assert_eq!(e.code, 401);
            assert!(e.body.contains("UnauthorizedError"));
            assert_eq!(e.message.as_deref(), Some("Invalid token"));
            assert_eq!(e.error_reference.as_deref(), Some("ref-9"));
        }
        other => panic!("Expected a rejection, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejection_with_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = create_client(&server.uri());
    let request = HttpRequest::builder(HttpMethod::Get, "posts/")
        .admin_token(&AdminToken::issue(&test_key()))
        .build()
        .unwrap();

    let error = client.execute(&request).await.unwrap_err();

    assert_eq!(error.to_string(), "Admin API returned 502: Bad Gateway");
}
