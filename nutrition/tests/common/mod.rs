//! Common test utilities for integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use vitalsense_nutrition::{
    config::{AppConfig, FatSecretConfig, ServerConfig},
    routes,
    state::AppState,
};

/// Test application wrapper pointing at a mock FatSecret server
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a test application whose FatSecret base URLs point at
    /// `mock_base` (a wiremock server URI).
    pub fn new(mock_base: &str) -> Self {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            fatsecret: FatSecretConfig {
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
                oauth_url: format!("{mock_base}/connect/token"),
                api_url: format!("{mock_base}/rest/server.api"),
            },
        };
        let state = AppState::new(config);
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
