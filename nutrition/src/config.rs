//! Configuration management for the nutrition service
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: VS__)
//!
//! The FatSecret base URLs are configurable so tests can point the client
//! at a local mock server.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fatsecret: FatSecretConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// FatSecret platform API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatSecretConfig {
    pub client_id: String,
    pub client_secret: String,
    /// OAuth client-credentials token endpoint
    pub oauth_url: String,
    /// Method-style platform API endpoint
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
            },
            fatsecret: FatSecretConfig {
                client_id: String::new(),
                client_secret: String::new(),
                oauth_url: "https://oauth.fatsecret.com/connect/token".to_string(),
                api_url: "https://platform.fatsecret.com/rest/server.api".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with VS__ prefix
    ///    e.g., VS__FATSECRET__CLIENT_ID=... sets fatsecret.client_id
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix("VS").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
