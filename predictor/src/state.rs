//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state
//! extraction. The registry is loaded once at startup and immutable
//! afterwards, so concurrent reads need no synchronization; cloning the
//! state is just Arc increments.

use crate::config::AppConfig;
use crate::registry::Registry;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded model bundles, read-only for the process lifetime
    pub registry: Arc<Registry>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(registry: Registry, config: AppConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the model registry
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
