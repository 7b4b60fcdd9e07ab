//! VitalSense Nutrition Library
//!
//! This library exposes the nutrition service modules for use in tests.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fatsecret;
pub mod routes;
pub mod state;
