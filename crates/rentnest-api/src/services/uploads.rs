//! Data-URL image uploads into the profile and listing buckets.
//!
//! Rows store the object key, never a URL.

use rentnest_core::{models::Columns, AppError};
use rentnest_storage::{keys, DataUrl, Storage};
use serde_json::Value;
use uuid::Uuid;

use crate::state::ImageStorage;

async fn put(
    storage: &dyn Storage,
    data_url: &str,
    max_bytes: usize,
    key_for: impl FnOnce(&str) -> String,
) -> Result<String, AppError> {
    let decoded = DataUrl::parse_with_limit(data_url, max_bytes)?;
    let key = key_for(&decoded.extension());
    storage
        .upload(&key, decoded.data, &decoded.mime_type)
        .await?;
    Ok(key)
}

/// Upload a profile picture and return its key.
pub async fn store_profile_picture(
    images: &ImageStorage,
    owner_id: Uuid,
    data_url: &str,
) -> Result<String, AppError> {
    put(
        images.profiles.as_ref(),
        data_url,
        images.max_upload_bytes,
        |ext| keys::profile_picture_key(owner_id, ext),
    )
    .await
}

/// Upload a listing's thumbnail and image set.
///
/// Returns the `thumbnail` / `images` columns to write back, holding only the
/// parts that were supplied.
pub async fn store_listing_images(
    images: &ImageStorage,
    landlord_id: Uuid,
    listing_id: Uuid,
    thumbnail: Option<&str>,
    gallery: Option<&[String]>,
) -> Result<Columns, AppError> {
    let mut columns = Columns::new();

    if let Some(thumbnail) = thumbnail {
        let key = put(
            images.listings.as_ref(),
            thumbnail,
            images.max_upload_bytes,
            |ext| keys::listing_thumbnail_key(landlord_id, listing_id, ext),
        )
        .await?;
        columns.insert("thumbnail".to_string(), Value::String(key));
    }

    if let Some(gallery) = gallery {
        let mut stored = Vec::with_capacity(gallery.len());
        for (index, data_url) in gallery.iter().enumerate() {
            let key = put(
                images.listings.as_ref(),
                data_url,
                images.max_upload_bytes,
                |ext| keys::listing_image_key(landlord_id, listing_id, index, ext),
            )
            .await?;
            stored.push(Value::String(key));
        }
        columns.insert("images".to_string(), Value::Array(stored));
    }

    Ok(columns)
}

/// Delete listing images, logging instead of failing.
pub async fn remove_listing_images(images: &ImageStorage, listing_id: Uuid, image_keys: &[String]) {
    if image_keys.is_empty() {
        return;
    }
    if let Err(e) = images.listings.delete(image_keys).await {
        tracing::warn!(
            listing_id = %listing_id,
            error = %e,
            count = image_keys.len(),
            "Failed to remove listing images"
        );
    }
}
