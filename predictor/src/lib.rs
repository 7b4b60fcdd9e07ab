//! VitalSense Predictor Library
//!
//! This library exposes the prediction service modules for use in tests.

pub mod config;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod routes;
pub mod state;
