//! Decoding of `data:<mime>;base64,<payload>` strings.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;

use crate::{StorageError, StorageResult};

/// Decoded data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: Bytes,
}

impl DataUrl {
    pub fn parse(input: &str) -> StorageResult<Self> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| StorageError::InvalidDataUrl("missing data: prefix".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| StorageError::InvalidDataUrl("missing payload".to_string()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim().to_lowercase();
        if !mime_type.contains('/') {
            return Err(StorageError::InvalidDataUrl(format!(
                "invalid media type '{}'",
                mime_type
            )));
        }
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(StorageError::InvalidDataUrl(
                "only base64 payloads are supported".to_string(),
            ));
        }

        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(StorageError::InvalidDataUrl("empty payload".to_string()));
        }
        let data = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| StorageError::InvalidDataUrl(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime_type,
            data: Bytes::from(data),
        })
    }

    /// Decode and enforce an upper bound on the decoded size.
    pub fn parse_with_limit(input: &str, max_bytes: usize) -> StorageResult<Self> {
        let data_url = Self::parse(input)?;
        if data_url.data.len() > max_bytes {
            return Err(StorageError::TooLarge {
                size: data_url.data.len(),
                max: max_bytes,
            });
        }
        Ok(data_url)
    }

    /// File extension for the media type
    pub fn extension(&self) -> String {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg".to_string(),
            "image/svg+xml" => "svg".to_string(),
            "image/x-icon" | "image/vnd.microsoft.icon" => "ico".to_string(),
            other => {
                let subtype = other.split('/').nth(1).unwrap_or_default();
                let cleaned: String = subtype
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect();
                if cleaned.is_empty() {
                    "bin".to_string()
                } else {
                    cleaned
                }
            }
        }
    }
}
