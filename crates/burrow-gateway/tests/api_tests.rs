//! Integration tests for the shorten and redirect endpoints.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use burrow_core::{LinkId, ReadRepository, Repository, StorageError};
use common::{get, memory_router, post, request, router_with};

#[tokio::test]
async fn shorten_and_redirect_scenario() {
    let router = memory_router();

    let response = post(&router, "/", "https://www.google.com").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.text(), "http://localhost:8080/1");
    assert_eq!(response.header("content-type"), Some("text/html"));

    let response = post(&router, "/", "https://ya.ru").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.text(), "http://localhost:8080/2");

    let response = get(&router, "/1").await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), Some("https://www.google.com"));
    assert!(response.body.is_empty());

    let response = post(&router, "/api/shorten", r#"{"url":"http://ya.ru"}"#).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.text(), r#"{"result":"http://localhost:8080/3"}"#);
    assert_eq!(response.header("content-type"), Some("application/json"));

    let response = post(&router, "/", "123").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "this \"123\" is not URL");

    let response = get(&router, "/999999999999").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "this ID: 999999999999 is not valid");

    let response = get(&router, "/10").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "URL with ID 10 is not found");
}

#[tokio::test]
async fn plain_body_trailing_newline_is_trimmed() {
    let router = memory_router();

    let response = post(&router, "/", "https://example.com/path\r\n").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = get(&router, "/1").await;
    assert_eq!(response.header("location"), Some("https://example.com/path"));
}

#[tokio::test]
async fn plain_empty_body_is_rejected() {
    let router = memory_router();

    let response = post(&router, "/", "\n").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "empty request body");

    // The rejected request must not consume an id.
    let response = post(&router, "/", "https://example.com").await;
    assert_eq!(response.text(), "http://localhost:8080/1");
}

#[tokio::test]
async fn json_malformed_body_is_rejected() {
    let router = memory_router();

    let response = post(&router, "/api/shorten", "http://ya.ru").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "invalid data JSON");
}

#[tokio::test]
async fn json_missing_or_empty_url_is_rejected() {
    let router = memory_router();

    for body in [r#"{"url":""}"#, "{}", r#"{"url":null}"#] {
        let response = post(&router, "/api/shorten", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.text(), "URL field is required");
    }
}

#[tokio::test]
async fn json_invalid_url_is_rejected() {
    let router = memory_router();

    let response = post(&router, "/api/shorten", r#"{"url":"not a url"}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "this \"not a url\" is not URL");
}

#[tokio::test]
async fn urls_with_control_characters_are_rejected() {
    let router = memory_router();

    let response = post(&router, "/", "https://example.com/a\nb").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "this \"https://example.com/a\nb\" is not URL");

    let response = post(&router, "/api/shorten", r#"{"url":"https://example.com/a\nb"}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = post(&router, "/api/shorten", r#"{"url":"https://example.com/a\tb"}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Nothing was stored, so the first accepted URL still gets id 1.
    let response = post(&router, "/", "https://example.com/ab").await;
    assert_eq!(response.text(), "http://localhost:8080/1");
    let response = get(&router, "/1").await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), Some("https://example.com/ab"));
}

#[tokio::test]
async fn non_ascii_url_round_trips() {
    let router = memory_router();

    let response = post(&router, "/", "https://пример.рф/путь").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = get(&router, "/1").await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers.get("location").map(|v| v.as_bytes()),
        Some("https://пример.рф/путь".as_bytes())
    );
}

#[tokio::test]
async fn invalid_ids_are_rejected() {
    let router = memory_router();

    for id in ["0", "abc", "4294967296", "9223372036854775808"] {
        let response = get(&router, &format!("/{id}")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "id: {id}");
        assert_eq!(response.text(), format!("this ID: {id} is not valid"));
    }
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let router = memory_router();

    let response = request(&router, Method::PUT, "/", "").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.body.is_empty());

    let response = get(&router, "/api/shorten").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = post(&router, "/1", "https://example.com").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_path_is_an_invalid_request() {
    let router = memory_router();

    let response = get(&router, "/api/shorten/extra").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "invalid request");
}

#[tokio::test]
async fn base_url_trailing_slash_is_ignored() {
    let router = burrow_gateway::App::router(burrow_gateway::AppState::new(
        Arc::new(burrow_storage::InMemoryRepository::new()),
        "https://brw.io/",
    ));

    let response = post(&router, "/", "https://example.com").await;
    assert_eq!(response.text(), "https://brw.io/1");
}

/// A repository whose backing store is unavailable.
struct BrokenRepository;

#[async_trait]
impl ReadRepository for BrokenRepository {
    async fn read_url(&self, _id: LinkId) -> burrow_core::error::Result<String> {
        Err(StorageError::Io(std::io::Error::other("disk unavailable")))
    }
}

#[async_trait]
impl Repository for BrokenRepository {
    async fn write_url(&self, _url: &str) -> burrow_core::error::Result<LinkId> {
        Err(StorageError::Corrupted("unexpected end of input".to_string()))
    }
}

#[tokio::test]
async fn storage_failures_are_server_errors() {
    let router = router_with(Arc::new(BrokenRepository));

    let response = post(&router, "/", "https://example.com").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text(),
        "snapshot is corrupted: unexpected end of input"
    );

    let response = post(&router, "/api/shorten", r#"{"url":"https://example.com"}"#).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let response = get(&router, "/1").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "storage io failed: disk unavailable");
}

#[tokio::test]
async fn unusable_redirect_target_is_a_server_error() {
    let repository = Arc::new(burrow_storage::InMemoryRepository::new());
    // Newlines cannot appear in a header value.
    let id = repository
        .write_url("https://example.com/\nSet-Cookie: x=1")
        .await
        .unwrap();

    let router = router_with(repository);
    let response = get(&router, &format!("/{id}")).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.header("location").is_none());
}
