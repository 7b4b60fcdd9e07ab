//! Route definitions for the prediction service
//!
//! One POST route per prediction domain, plus the health and index
//! routes, with the shared middleware stack applied once.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod health;
mod predict;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health_check))
        .route("/predict/diabetes", post(predict::predict_diabetes))
        .route("/predict/cancer", post(predict::predict_cancer))
        .route("/predict/cardio", post(predict::predict_cardio))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - static description of the available routes
async fn home() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "Welcome to Medical Prediction API",
        "endpoints": {
            "/predict/diabetes": "POST - Make diabetes predictions",
            "/predict/cancer": "POST - Make cancer predictions",
            "/predict/cardio": "POST - Make cardiovascular disease predictions",
            "/health": "GET - Check API health status"
        }
    }))
}
