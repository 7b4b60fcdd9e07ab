//! VitalSense Shared Library
//!
//! This crate contains the pure domain calculations used across the
//! VitalSense services: linear-model inference primitives for the
//! predictor and meal-analysis math for the nutrition service.

pub mod linear;
pub mod meal;

// Re-export commonly used items
pub use linear::{LogisticModel, StandardScaler};
pub use meal::{analyze_meal, MacroTotals, MealAnalysis};
