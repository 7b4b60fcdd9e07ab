//! Meal analysis calculations
//!
//! Pure math for the nutrition service: macro-nutrient accumulation and
//! the healthiness score derived from macro energy ratios.
//!
//! The score is a step function over three ratio bands: each band awards
//! its full points only when the ratio falls inside the acceptable range
//! (protein 10-35%, carbohydrate 45-65%, fat 20-35% of calories). The
//! 33/33/34 split and the band edges are product-defined and deliberately
//! not rebalanced here.

use serde::{Deserialize, Serialize};

/// Calories per gram of protein and carbohydrate (Atwater factor).
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Calories per gram of fat (Atwater factor).
const KCAL_PER_G_FAT: f64 = 9.0;

const PROTEIN_BAND: (f64, f64) = (10.0, 35.0);
const CARB_BAND: (f64, f64) = (45.0, 65.0);
const FAT_BAND: (f64, f64) = (20.0, 35.0);

/// Running macro-nutrient totals for one request.
///
/// All fields are grams except `calories`; values only ever increase
/// while items are accumulated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl MacroTotals {
    /// Fold one resolved serving into the totals.
    pub fn add(&mut self, calories: f64, protein: f64, carbohydrates: f64, fat: f64) {
        self.calories += calories;
        self.protein += protein;
        self.carbohydrates += carbohydrates;
        self.fat += fat;
    }
}

/// Derived meal analysis returned alongside the raw totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAnalysis {
    pub meal_type: String,
    pub healthiness_score: u32,
    pub suggestions: Vec<String>,
}

impl Default for MealAnalysis {
    fn default() -> Self {
        Self {
            meal_type: "unknown".to_string(),
            healthiness_score: 0,
            suggestions: Vec::new(),
        }
    }
}

/// Analyze accumulated totals into a healthiness score and suggestions.
///
/// With zero calories there is nothing to rate: the score is 0 and no
/// suggestions are produced.
pub fn analyze_meal(totals: &MacroTotals) -> MealAnalysis {
    let mut analysis = MealAnalysis::default();
    if totals.calories <= 0.0 {
        return analysis;
    }

    let protein_ratio = totals.protein * KCAL_PER_G_PROTEIN_CARB / totals.calories * 100.0;
    let carb_ratio = totals.carbohydrates * KCAL_PER_G_PROTEIN_CARB / totals.calories * 100.0;
    let fat_ratio = totals.fat * KCAL_PER_G_FAT / totals.calories * 100.0;

    let score = u32::from(in_band(protein_ratio, PROTEIN_BAND)) * 33
        + u32::from(in_band(carb_ratio, CARB_BAND)) * 33
        + u32::from(in_band(fat_ratio, FAT_BAND)) * 34;
    analysis.healthiness_score = score.min(100);

    if protein_ratio < PROTEIN_BAND.0 {
        analysis
            .suggestions
            .push("Consider adding more protein-rich foods".to_string());
    }
    if carb_ratio < CARB_BAND.0 {
        analysis
            .suggestions
            .push("You might need more complex carbohydrates".to_string());
    }
    if fat_ratio < FAT_BAND.0 {
        analysis
            .suggestions
            .push("Consider adding healthy fats".to_string());
    }

    analysis
}

fn in_band(ratio: f64, band: (f64, f64)) -> bool {
    ratio >= band.0 && ratio <= band.1
}
