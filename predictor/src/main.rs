//! VitalSense Prediction Service
//!
//! Serves pre-trained binary classifiers for three medical domains
//! (diabetes, cancer, cardiovascular risk) behind JSON HTTP endpoints.
//!
//! ## Architecture
//!
//! - Registry: loads all model bundles once at startup, fatal on failure
//! - Normalizer: orders incoming payloads into each bundle's feature order
//! - Inference: standardize + logistic classifier, pure and in-process
//! - Routes: one POST route per domain plus health/index

use anyhow::{Context, Result};
use std::path::Path;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitalsense_predictor::{config, registry::Registry, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting VitalSense prediction service"
    );

    // Load all model bundles. Any missing or corrupt artifact aborts
    // startup before the listener is bound.
    info!(dir = %config.models.dir, "Loading model bundles...");
    let registry = Registry::load(Path::new(&config.models.dir))
        .context("Failed to load model bundles; refusing to start")?;

    let state = AppState::new(registry, config.clone());
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "vitalsense_predictor=info,tower_http=info".into()
        } else {
            "vitalsense_predictor=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
