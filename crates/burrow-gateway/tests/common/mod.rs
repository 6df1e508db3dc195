//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use burrow_core::Repository;
use burrow_gateway::{App, AppState};
use burrow_storage::InMemoryRepository;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://localhost:8080";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.to_str().unwrap())
    }
}

pub fn router_with(repository: Arc<dyn Repository>) -> Router {
    App::router(AppState::new(repository, BASE_URL))
}

pub fn memory_router() -> Router {
    router_with(Arc::new(InMemoryRepository::new()))
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn request(router: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(router, request).await
}

pub async fn post(router: &Router, uri: &str, body: &str) -> TestResponse {
    request(router, Method::POST, uri, body).await
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    request(router, Method::GET, uri, "").await
}
