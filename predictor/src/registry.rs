//! Model registry
//!
//! Loads the serialized classifier bundles for every prediction domain at
//! process start and holds them read-only for the lifetime of the
//! process. A missing or inconsistent artifact is fatal: the service must
//! never come up serving partial capability silently.
//!
//! One bundle per domain lives at `<models_dir>/<domain>.json`, written
//! by the offline training step. The layout is the contract between the
//! trainer and this loader: the feature list fixes the column order of
//! every vector the scaler and classifier will ever see.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use vitalsense_shared::{LogisticModel, StandardScaler};

/// Prediction domains served by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Diabetes,
    Cancer,
    Cardio,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Diabetes, Domain::Cancer, Domain::Cardio];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Diabetes => "diabetes",
            Domain::Cancer => "cancer",
            Domain::Cardio => "cardio",
        }
    }

    /// Human-readable message for a positive (1) or negative (0) label.
    pub fn message(&self, positive: bool) -> &'static str {
        match (self, positive) {
            (Domain::Diabetes, true) => "Diabetes detected",
            (Domain::Diabetes, false) => "No diabetes detected",
            (Domain::Cancer, true) => "Cancer risk detected",
            (Domain::Cancer, false) => "No cancer risk detected",
            (Domain::Cardio, true) => "Cardiovascular disease risk detected",
            (Domain::Cardio, false) => "No cardiovascular disease risk detected",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed mapping from training-time labels to integer codes.
///
/// The vocabulary is closed at training time; looking up a label outside
/// it is a client error, never a silent fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryEncoder(pub BTreeMap<String, f64>);

impl CategoryEncoder {
    pub fn encode(&self, field: &str, label: &str) -> Result<f64, ApiError> {
        self.0
            .get(label)
            .copied()
            .ok_or_else(|| ApiError::UnknownCategory {
                field: field.to_string(),
                value: label.to_string(),
            })
    }
}

/// Everything the serving path needs for one domain, fitted offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Ordered feature-name list; fixes the column order of every vector
    pub features: Vec<String>,
    pub scaler: StandardScaler,
    /// Categorical field name -> fitted label encoder
    #[serde(default)]
    pub encoders: BTreeMap<String, CategoryEncoder>,
    pub classifier: LogisticModel,
}

impl ModelBundle {
    /// Check internal shape consistency between the feature list and the
    /// fitted components.
    fn validate(&self) -> Result<(), String> {
        let n = self.features.len();
        if self.scaler.dim() != n || self.scaler.scale.len() != n {
            return Err(format!(
                "scaler dimension {} does not match {} features",
                self.scaler.dim(),
                n
            ));
        }
        if self.classifier.dim() != n {
            return Err(format!(
                "classifier dimension {} does not match {} features",
                self.classifier.dim(),
                n
            ));
        }
        for field in self.encoders.keys() {
            if !self.features.contains(field) {
                return Err(format!("encoder field '{field}' is not in the feature list"));
            }
        }
        Ok(())
    }
}

/// Fatal artifact-loading errors. The process must not start serving
/// when any of these occur.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Inconsistent model artifact for {domain}: {reason}")]
    Inconsistent { domain: Domain, reason: String },
}

/// Read-only collection of all loaded model bundles.
///
/// Constructed once at startup and shared by reference (via the app
/// state's `Arc`) across all request handlers.
#[derive(Debug)]
pub struct Registry {
    bundles: HashMap<Domain, ModelBundle>,
}

impl Registry {
    /// Load the bundle for every domain from `models_dir`, refusing to
    /// construct a partial registry.
    pub fn load(models_dir: &Path) -> Result<Self, StartupError> {
        let mut bundles = HashMap::new();
        for domain in Domain::ALL {
            let path = models_dir.join(format!("{domain}.json"));
            let bundle = Self::load_bundle(domain, &path)?;
            tracing::info!(
                domain = %domain,
                features = bundle.features.len(),
                "Loaded model bundle"
            );
            bundles.insert(domain, bundle);
        }
        Ok(Self { bundles })
    }

    fn load_bundle(domain: Domain, path: &Path) -> Result<ModelBundle, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle: ModelBundle =
            serde_json::from_str(&raw).map_err(|source| StartupError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        bundle
            .validate()
            .map_err(|reason| StartupError::Inconsistent { domain, reason })?;
        Ok(bundle)
    }

    /// Build a registry from in-memory bundles. Used by tests; the
    /// serving binary always goes through `load`.
    pub fn from_bundles(bundles: HashMap<Domain, ModelBundle>) -> Self {
        Self { bundles }
    }

    pub fn bundle(&self, domain: Domain) -> Option<&ModelBundle> {
        self.bundles.get(&domain)
    }

    pub fn is_loaded(&self, domain: Domain) -> bool {
        self.bundles.contains_key(&domain)
    }
}
