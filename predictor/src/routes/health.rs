//! Health check endpoint
//!
//! Reports one flag per prediction domain. The registry refuses to load
//! partially, so a serving process reports every flag true; the shape is
//! kept per-domain so operators can still see what a broken deployment
//! would be missing.

use crate::registry::Domain;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub models_loaded: ModelsLoaded,
}

/// Per-domain load flags
#[derive(Serialize)]
pub struct ModelsLoaded {
    pub diabetes: bool,
    pub cancer: bool,
    pub cardio: bool,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.registry();
    Json(HealthResponse {
        status: "healthy".to_string(),
        models_loaded: ModelsLoaded {
            diabetes: registry.is_loaded(Domain::Diabetes),
            cancer: registry.is_loaded(Domain::Cancer),
            cardio: registry.is_loaded(Domain::Cardio),
        },
    })
}
