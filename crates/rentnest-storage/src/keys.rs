//! Shared key generation for storage backends.
//!
//! Profile pictures live at `{owner_id}/profile_picture.{ext}`; listing images
//! at `{landlord_id}/{listing_id}/thumbnail.{ext}` and
//! `{landlord_id}/{listing_id}/images/{index}.{ext}`.

use uuid::Uuid;

use crate::{StorageError, StorageResult};

pub fn profile_picture_key(owner_id: Uuid, extension: &str) -> String {
    format!("{}/profile_picture.{}", owner_id, extension)
}

/// Folder holding every image of one listing
pub fn listing_prefix(landlord_id: Uuid, listing_id: Uuid) -> String {
    format!("{}/{}", landlord_id, listing_id)
}

pub fn listing_thumbnail_key(landlord_id: Uuid, listing_id: Uuid, extension: &str) -> String {
    format!(
        "{}/thumbnail.{}",
        listing_prefix(landlord_id, listing_id),
        extension
    )
}

pub fn listing_image_key(
    landlord_id: Uuid,
    listing_id: Uuid,
    index: usize,
    extension: &str,
) -> String {
    format!(
        "{}/images/{}.{}",
        listing_prefix(landlord_id, listing_id),
        index,
        extension
    )
}

/// Reject keys that could escape the bucket root.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keys_share_prefix() {
        let landlord = Uuid::new_v4();
        let listing = Uuid::new_v4();
        let prefix = listing_prefix(landlord, listing);

        assert_eq!(
            listing_thumbnail_key(landlord, listing, "png"),
            format!("{}/thumbnail.png", prefix)
        );
        assert_eq!(
            listing_image_key(landlord, listing, 2, "jpg"),
            format!("{}/images/2.jpg", prefix)
        );
    }

    #[test]
    fn test_validate_key() {
        let owner = Uuid::new_v4();
        assert!(validate_key(&profile_picture_key(owner, "webp")).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../secret").is_err());
        assert!(validate_key("/etc/passwd").is_err());
    }
}
