//! Prediction endpoints
//!
//! Each handler runs the same pipeline against its domain's bundle:
//! normalize the payload into the bundle's feature order, standardize,
//! ask the classifier for a label and positive-class probability, wrap
//! the result with the domain's message.

use crate::error::{ApiError, ApiResult};
use crate::normalize::feature_vector;
use crate::registry::Domain;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

/// Prediction response body
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: i32,
    pub probability: f64,
    pub message: String,
}

/// POST /predict/diabetes
pub async fn predict_diabetes(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<PredictionResponse>> {
    predict(&state, Domain::Diabetes, payload)
}

/// POST /predict/cancer
pub async fn predict_cancer(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<PredictionResponse>> {
    predict(&state, Domain::Cancer, payload)
}

/// POST /predict/cardio
pub async fn predict_cardio(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<PredictionResponse>> {
    predict(&state, Domain::Cardio, payload)
}

/// Shared prediction pipeline. Inference is in-process and synchronous;
/// the bundle is read-only so no locking is involved.
fn predict(state: &AppState, domain: Domain, payload: Value) -> ApiResult<Json<PredictionResponse>> {
    let object = payload
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".to_string()))?;

    let bundle = state
        .registry()
        .bundle(domain)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("model bundle for {domain} not loaded")))?;

    let features = feature_vector(bundle, object)?;
    let scaled = bundle.scaler.transform(&features);
    let probability = bundle.classifier.predict_proba(&scaled);
    let prediction = bundle.classifier.predict(&scaled);

    tracing::debug!(
        domain = %domain,
        prediction,
        probability,
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        prediction,
        probability,
        message: domain.message(prediction == 1).to_string(),
    }))
}
