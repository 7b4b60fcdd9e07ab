//! Common test utilities for integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::path::Path;
use vitalsense_predictor::{
    config::AppConfig,
    registry::Registry,
    routes,
    state::AppState,
};

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a test application backed by the shipped model artifacts.
    pub fn new() -> Self {
        let registry = Registry::load(Path::new("models")).expect("Failed to load model bundles");
        let state = AppState::new(registry, AppConfig::default());
        let app = routes::create_router(state);
        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        use tower::ServiceExt;

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}
