//! Request normalization
//!
//! Turns an arbitrary incoming JSON object into the exact ordered feature
//! vector a domain's bundle expects. Categorical fields go through the
//! bundle's fitted encoders first; everything else is coerced to f64.
//! Fields present in the input but absent from the feature list are
//! dropped; input key order never influences the result.

use crate::error::ApiError;
use crate::registry::ModelBundle;
use serde_json::{Map, Value};

/// Build the feature vector for `payload` in the bundle's column order.
pub fn feature_vector(
    bundle: &ModelBundle,
    payload: &Map<String, Value>,
) -> Result<Vec<f64>, ApiError> {
    bundle
        .features
        .iter()
        .map(|field| {
            let value = payload
                .get(field)
                .ok_or_else(|| ApiError::MissingField(field.clone()))?;
            match bundle.encoders.get(field) {
                Some(encoder) => {
                    let label = value.as_str().ok_or_else(|| ApiError::MalformedInput {
                        field: field.clone(),
                        value: value.to_string(),
                    })?;
                    encoder.encode(field, label)
                }
                None => coerce_numeric(field, value),
            }
        })
        .collect()
}

/// Coerce a JSON value to f64: numbers directly, strings via parsing.
/// Anything else is a malformed input.
fn coerce_numeric(field: &str, value: &Value) -> Result<f64, ApiError> {
    let malformed = || ApiError::MalformedInput {
        field: field.to_string(),
        value: value.to_string(),
    };
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(malformed),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}
