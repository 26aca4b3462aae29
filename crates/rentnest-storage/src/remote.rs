//! Managed bucket storage reached over its HTTP API.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Storage backend for one bucket of the managed object store
#[derive(Clone)]
pub struct RemoteStorage {
    client: Client,
    storage_url: String,
    service_key: String,
    bucket: String,
}

impl RemoteStorage {
    pub fn new(base_url: &str, service_key: String, bucket: impl Into<String>) -> StorageResult<Self> {
        let bucket = bucket.into();
        validate_key(&bucket)?;
        if service_key.is_empty() {
            return Err(StorageError::ConfigError(
                "service key must not be empty".to_string(),
            ));
        }

        let client = Client::builder().build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            storage_url: format!("{}/storage/v1", base_url.trim_end_matches('/')),
            service_key,
            bucket,
        })
    }

    /// Percent-encode each path segment of a key
    fn encode_key(storage_key: &str) -> String {
        storage_key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, storage_key: &str) -> String {
        format!(
            "{}/object/{}/{}",
            self.storage_url,
            self.bucket,
            Self::encode_key(storage_key)
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<StorageErrorBody>(&body) {
            Ok(StorageErrorBody {
                message: Some(message),
                ..
            }) => message,
            Ok(StorageErrorBody {
                error: Some(error), ..
            }) => error,
            _ if body.is_empty() => status.to_string(),
            _ => body,
        }
    }
}

#[async_trait]
impl Storage for RemoteStorage {
    async fn upload(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .authorized(self.client.post(self.object_url(storage_key)))
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            tracing::warn!(bucket = %self.bucket, key = %storage_key, error = %message, "Bucket upload failed");
            return Err(StorageError::UploadFailed(message));
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bucket upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn delete(&self, storage_keys: &[String]) -> StorageResult<()> {
        if storage_keys.is_empty() {
            return Ok(());
        }
        for key in storage_keys {
            validate_key(key)?;
        }

        let response = self
            .authorized(
                self.client
                    .delete(format!("{}/object/{}", self.storage_url, self.bucket)),
            )
            .json(&json!({ "prefixes": storage_keys }))
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::DeleteFailed(
                Self::error_message(response).await,
            ));
        }

        tracing::debug!(bucket = %self.bucket, count = storage_keys.len(), "Bucket delete successful");
        Ok(())
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url,
            self.bucket,
            Self::encode_key(storage_key)
        )
    }

    async fn health_check(&self) -> StorageResult<()> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/bucket/{}", self.storage_url, self.bucket)),
            )
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StorageError::BackendError(
                Self::error_message(response).await,
            ))
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> RemoteStorage {
        RemoteStorage::new(
            "https://project.supabase.co/",
            "service-key".to_string(),
            "profile-pictures",
        )
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let storage = storage();
        assert_eq!(
            storage.object_url("abc/profile_picture.png"),
            "https://project.supabase.co/storage/v1/object/profile-pictures/abc/profile_picture.png"
        );
        assert_eq!(
            storage.public_url("abc/profile_picture.png"),
            "https://project.supabase.co/storage/v1/object/public/profile-pictures/abc/profile_picture.png"
        );
    }

    #[test]
    fn test_key_segments_are_encoded() {
        assert_eq!(
            RemoteStorage::encode_key("a b/c#d.png"),
            "a%20b/c%23d.png"
        );
    }

    #[test]
    fn test_requires_service_key() {
        assert!(RemoteStorage::new("https://project.supabase.co", String::new(), "b").is_err());
    }
}
