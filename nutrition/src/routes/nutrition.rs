//! Nutrition aggregation endpoint

use crate::aggregator::{self, NutritionReport};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

/// Request body for POST /nutrition
#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    pub food_items: Option<Vec<String>>,
}

/// POST /nutrition - resolve food descriptions and aggregate macros
///
/// A body without a `food_items` array (or no parseable JSON body at
/// all) is a client error; upstream auth failure is a server error;
/// individual unresolvable items are skipped by the aggregator.
pub async fn get_nutrition(
    State(state): State<AppState>,
    body: Result<Json<NutritionRequest>, JsonRejection>,
) -> ApiResult<Json<NutritionReport>> {
    let food_items = body
        .ok()
        .and_then(|Json(request)| request.food_items)
        .ok_or_else(|| ApiError::BadRequest("No food items provided".to_string()))?;

    let report = aggregator::aggregate(state.client(), &food_items).await?;

    tracing::debug!(
        requested = food_items.len(),
        resolved = report.detected_foods.len(),
        "Nutrition request served"
    );

    Ok(Json(report))
}
