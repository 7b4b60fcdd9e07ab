//! Linear-model inference primitives
//!
//! Provides the two pieces of fitted state a serialized classifier bundle
//! carries: a per-column standardization transform and a logistic
//! classifier head. Both are plain serde types so the offline trainer and
//! the serving registry agree on layout without any custom codec.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: inference has no side effects and no interior
//!    mutability, so fitted models are safe to share across request tasks
//! 2. **Fixed Shapes**: callers guarantee the input vector length matches
//!    the fitted dimension; the registry validates this once at load time

use serde::{Deserialize, Serialize};

/// Per-column affine standardization fitted offline.
///
/// `transform` maps `x[i]` to `(x[i] - mean[i]) / scale[i]`, the standard
/// z-score transform. `mean` and `scale` have one entry per feature
/// column, in feature order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Number of feature columns this scaler was fitted on.
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a feature vector in fitted column order.
    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        debug_assert_eq!(features.len(), self.mean.len());
        features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

/// Fitted binary logistic classifier.
///
/// The positive-class probability is `sigmoid(weights · x + intercept)`;
/// the hard label is 1 exactly when that probability reaches the 0.5
/// decision threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Number of feature columns this model was fitted on.
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Probability assigned to class 1, always within [0, 1].
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());
        let z: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    /// Hard 0/1 label at the 0.5 decision threshold.
    pub fn predict(&self, features: &[f64]) -> i32 {
        i32::from(self.predict_proba(features) >= 0.5)
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_model() -> LogisticModel {
        LogisticModel {
            weights: vec![1.5, -0.8, 0.3],
            intercept: -0.2,
        }
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        };
        let scaled = scaler.transform(&[14.0, -3.0]);
        assert_eq!(scaled, vec![2.0, -3.0]);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_extremes_stay_finite() {
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_label_matches_threshold() {
        let model = test_model();
        // Strongly positive and strongly negative inputs
        let hot = [3.0, -2.0, 1.0];
        let cold = [-3.0, 2.0, -1.0];
        assert_eq!(model.predict(&hot), 1);
        assert!(model.predict_proba(&hot) >= 0.5);
        assert_eq!(model.predict(&cold), 0);
        assert!(model.predict_proba(&cold) < 0.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: probability is always within [0, 1]
        #[test]
        fn prop_proba_bounded(
            a in -1e3f64..1e3,
            b in -1e3f64..1e3,
            c in -1e3f64..1e3
        ) {
            let p = test_model().predict_proba(&[a, b, c]);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        /// Property: label is 1 exactly when probability >= 0.5
        #[test]
        fn prop_label_consistent_with_proba(
            a in -1e3f64..1e3,
            b in -1e3f64..1e3,
            c in -1e3f64..1e3
        ) {
            let model = test_model();
            let x = [a, b, c];
            let label = model.predict(&x);
            prop_assert!(label == 0 || label == 1);
            prop_assert_eq!(label == 1, model.predict_proba(&x) >= 0.5);
        }
    }
}
