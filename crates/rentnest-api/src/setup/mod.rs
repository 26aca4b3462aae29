//! Application setup and initialization
//!
//! Everything the process needs is built here once: the remote store client,
//! the two image buckets, the state holding them, and the router.

pub mod routes;
pub mod server;
pub mod storage;
pub mod store;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use rentnest_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let store = store::setup_store(&config)?;
    let (profile_images, listing_images) = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(
        config.clone(),
        store,
        profile_images,
        listing_images,
    ));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
