use crate::{LocalStorage, RemoteStorage, Storage, StorageBackend, StorageError, StorageResult};
use rentnest_core::Config;
use std::sync::Arc;

/// Create the storage backend for one bucket based on configuration
pub async fn create_storage(config: &Config, bucket: &str) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::Remote => {
            let base_url = config.supabase_url().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_URL not configured".to_string())
            })?;
            let service_key = config.supabase_service_key().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_SERVICE_KEY not configured".to_string())
            })?;

            let storage = RemoteStorage::new(base_url, service_key.to_string(), bucket)?;
            Ok(Arc::new(storage))
        }

        StorageBackend::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(bucket, base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentnest_core::MarketplaceConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_local_storage_per_bucket() {
        let dir = tempdir().unwrap();
        let config = Config(Box::new(MarketplaceConfig {
            local_storage_path: Some(dir.path().to_string_lossy().to_string()),
            local_storage_base_url: Some("http://localhost:5000/storage".to_string()),
            ..Default::default()
        }));

        let storage = create_storage(&config, "profile-pictures").await.unwrap();
        assert_eq!(storage.bucket(), "profile-pictures");
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(dir.path().join("profile-pictures").is_dir());
    }

    #[tokio::test]
    async fn test_remote_storage_requires_credentials() {
        let config = Config(Box::new(MarketplaceConfig {
            storage_backend: StorageBackend::Remote,
            ..Default::default()
        }));

        let result = create_storage(&config, "listing-images").await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
