//! Nutrition aggregation
//!
//! Resolves each requested food description against the FatSecret API
//! and folds the results into macro totals plus a meal analysis.
//!
//! Failure policy: the token fetch happens up-front and its failure
//! fails the whole request; after that, every per-item failure (no
//! match, missing serving data, upstream error) is logged and the item
//! skipped, so the request succeeds with whatever items resolved.

use crate::fatsecret::{FatSecretClient, UpstreamError};
use serde::Serialize;
use tracing::warn;
use vitalsense_shared::{analyze_meal, MacroTotals, MealAnalysis};

/// Aggregated result for one request.
#[derive(Debug, Serialize)]
pub struct NutritionReport {
    pub detected_foods: Vec<String>,
    pub nutrition: MacroTotals,
    pub analysis: MealAnalysis,
}

/// One food item successfully resolved to a serving.
#[derive(Debug)]
pub struct ResolvedFood {
    /// Original description plus the serving it was matched to
    pub label: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

/// Normalize a food description into a search term: trimmed, lowercased,
/// with any parenthetical portion annotation dropped. The original
/// string is still used for the detected-foods label.
pub fn search_term(item: &str) -> String {
    let cleaned = item.trim().to_lowercase();
    cleaned
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Resolve every item and aggregate the totals.
pub async fn aggregate(
    client: &FatSecretClient,
    food_items: &[String],
) -> Result<NutritionReport, UpstreamError> {
    // Auth failure fails the request; item lookups below do not.
    client.token().await?;

    let mut detected_foods = Vec::new();
    let mut totals = MacroTotals::default();

    for item in food_items {
        match resolve_food(client, item).await {
            Ok(food) => {
                totals.add(food.calories, food.protein, food.carbohydrates, food.fat);
                detected_foods.push(food.label);
            }
            Err(error) => {
                warn!(item = %item, %error, "Skipping unresolved food item");
            }
        }
    }

    let analysis = analyze_meal(&totals);
    Ok(NutritionReport {
        detected_foods,
        nutrition: totals,
        analysis,
    })
}

/// Resolve one food description: search, take the first match, fetch its
/// details, take the first serving.
async fn resolve_food(
    client: &FatSecretClient,
    item: &str,
) -> Result<ResolvedFood, UpstreamError> {
    let term = search_term(item);
    if term.is_empty() {
        return Err(UpstreamError::NoMatch(item.to_string()));
    }

    let matched = client.search_first(&term).await?;
    let serving = client.first_serving(&matched.food_id).await?;

    Ok(ResolvedFood {
        label: format!("{} ({})", item, serving.description()),
        calories: serving.calories_value(),
        protein: serving.protein_value(),
        carbohydrates: serving.carbohydrate_value(),
        fat: serving.fat_value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("banana", "banana")]
    #[case::mixed_case("  Chicken Breast  ", "chicken breast")]
    #[case::portion_annotation("chicken breast (100g)", "chicken breast")]
    #[case::nested_spaces("Brown Rice ( 1 cup )", "brown rice")]
    #[case::leading_paren("(unlabeled)", "")]
    fn test_search_term(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(search_term(input), expected);
    }
}
