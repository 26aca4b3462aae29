//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use rentnest_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("File too large: {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidDataUrl(_)
            | StorageError::InvalidKey(_)
            | StorageError::TooLarge { .. } => AppError::InvalidInput(err.to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// One instance serves one bucket. Uploads always overwrite an existing object
/// with the same key, so re-uploading a profile picture replaces it.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `storage_key`, replacing any existing object.
    /// Returns the public URL of the object.
    async fn upload(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Delete the given keys. Missing keys are not an error.
    async fn delete(&self, storage_keys: &[String]) -> StorageResult<()>;

    /// Public URL of a key, whether or not the object exists
    fn public_url(&self, storage_key: &str) -> String;

    /// Check that the bucket is reachable
    async fn health_check(&self) -> StorageResult<()>;

    /// Bucket this instance writes to
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
