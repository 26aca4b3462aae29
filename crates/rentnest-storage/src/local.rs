use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Each bucket maps to a directory; `base_url` is where that directory is
/// served from.
#[derive(Clone)]
pub struct LocalStorage {
    bucket: String,
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket name, used as a sub-directory of `root`
    /// * `root` - Root directory for file storage (e.g., "/var/lib/rentnest/storage")
    /// * `base_url` - Base URL the root is served from (e.g., "http://localhost:5000/storage")
    pub async fn new(
        bucket: impl Into<String>,
        root: impl AsRef<Path>,
        base_url: &str,
    ) -> StorageResult<Self> {
        let bucket = bucket.into();
        validate_key(&bucket)?;
        let base_path = root.as_ref().join(&bucket);

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_url: format!("{}/{}", base_url.trim_end_matches('/'), bucket),
            bucket,
            base_path,
        })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Keys that resolve outside the bucket directory are rejected.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn delete(&self, storage_keys: &[String]) -> StorageResult<()> {
        for storage_key in storage_keys {
            let path = self.key_to_path(storage_key)?;

            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }

            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            tracing::debug!(bucket = %self.bucket, key = %storage_key, "Local storage delete successful");
        }

        Ok(())
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url, storage_key)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.base_path).await?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(StorageError::BackendError(format!(
                "{} is not a directory",
                self.base_path.display()
            )))
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new("listing-images", dir, "http://localhost:5000/storage/")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let url = storage
            .upload("owner/profile_picture.png", Bytes::from_static(b"test data"), "image/png")
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:5000/storage/listing-images/owner/profile_picture.png"
        );
        let stored = fs::read(dir.path().join("listing-images/owner/profile_picture.png"))
            .await
            .unwrap();
        assert_eq!(stored, b"test data");
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_object() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload("a/thumbnail.png", Bytes::from_static(b"first"), "image/png")
            .await
            .unwrap();
        storage
            .upload("a/thumbnail.png", Bytes::from_static(b"second"), "image/png")
            .await
            .unwrap();

        let stored = fs::read(dir.path().join("listing-images/a/thumbnail.png"))
            .await
            .unwrap();
        assert_eq!(stored, b"second");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let result = storage
            .upload("../../../etc/passwd", Bytes::from_static(b"x"), "text/plain")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete(&["../etc/passwd".to_string()]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete(&["/etc/passwd".to_string()]).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_skips_missing_keys() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload("l/x/images/0.png", Bytes::from_static(b"img"), "image/png")
            .await
            .unwrap();

        storage
            .delete(&["l/x/images/0.png".to_string(), "nonexistent/file.png".to_string()])
            .await
            .unwrap();

        assert!(!dir.path().join("listing-images/l/x/images/0.png").exists());
        assert!(storage.health_check().await.is_ok());
    }
}
