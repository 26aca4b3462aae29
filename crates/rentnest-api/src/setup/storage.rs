//! Storage setup and initialization

use anyhow::{Context, Result};
use rentnest_core::Config;
use rentnest_storage::{create_storage, Storage};
use std::sync::Arc;

/// Storage for the profile-picture bucket and the listing-image bucket.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    tracing::info!("Initializing image storage...");

    let profiles = create_storage(config, config.profile_bucket())
        .await
        .context("Failed to initialize profile picture storage")?;
    let listings = create_storage(config, config.listing_bucket())
        .await
        .context("Failed to initialize listing image storage")?;

    tracing::info!(
        backend = %profiles.backend_type(),
        profile_bucket = profiles.bucket(),
        listing_bucket = listings.bucket(),
        "Image storage initialized successfully"
    );

    Ok((profiles, listings))
}
