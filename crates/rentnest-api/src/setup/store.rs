//! Remote store setup

use anyhow::{Context, Result};
use rentnest_core::{Config, StoreBackend};
use rentnest_db::{MemoryStore, PostgrestStore, RemoteStore};
use std::sync::Arc;

/// Build the single remote store handle shared by every repository.
pub fn setup_store(config: &Config) -> Result<Arc<dyn RemoteStore>> {
    let store: Arc<dyn RemoteStore> = match config.store_backend() {
        StoreBackend::Remote => {
            let url = config
                .supabase_url()
                .context("SUPABASE_URL must be set for the remote store")?;
            let key = config
                .supabase_service_key()
                .context("SUPABASE_SERVICE_KEY must be set for the remote store")?;
            let store = PostgrestStore::new(url, key.to_string())
                .context("Failed to create remote store client")?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store - data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!(backend = store.backend_name(), "Remote store initialized");
    Ok(store)
}
