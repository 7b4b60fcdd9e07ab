//! Application state management
//!
//! Shared state passed to request handlers via Axum's state extraction.
//! The FatSecret client (with its token cache) lives behind an Arc so
//! every request shares one cache; cloning the state is O(1).

use crate::config::AppConfig;
use crate::fatsecret::FatSecretClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// FatSecret API client with the process-wide token cache
    pub client: Arc<FatSecretClient>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = FatSecretClient::new(&config.fatsecret);
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the FatSecret client
    #[inline]
    pub fn client(&self) -> &FatSecretClient {
        &self.client
    }
}
