use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;
use crate::AppError;

/// Availability of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Occupied,
    Unlisted,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Occupied => "occupied",
            ListingStatus::Unlisted => "unlisted",
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ListingStatus::Available),
            "occupied" => Ok(ListingStatus::Occupied),
            "unlisted" => Ok(ListingStatus::Unlisted),
            other => Err(AppError::InvalidInput(format!(
                "Invalid listing status '{}'. Must be one of: available, occupied, unlisted",
                other
            ))),
        }
    }
}

/// Reject a `status` column the listing model cannot read back.
pub fn check_listing_status(columns: &Columns) -> Result<(), AppError> {
    match columns.get("status") {
        None => Ok(()),
        Some(serde_json::Value::String(status)) => status.parse::<ListingStatus>().map(|_| ()),
        Some(other) => Err(AppError::InvalidInput(format!(
            "Listing status must be a string, got {}",
            other
        ))),
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rentable property created by a landlord.
///
/// `thumbnail` and `images` hold storage keys in the listing bucket, not URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    #[serde(default)]
    pub landlord_id: Option<Uuid>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Columns,
}

impl Listing {
    /// Only unlisted properties may be deleted.
    pub fn is_deletable(&self) -> bool {
        self.status == Some(ListingStatus::Unlisted)
    }

    /// Every storage key referenced by this listing.
    pub fn image_keys(&self) -> Vec<String> {
        self.thumbnail
            .iter()
            .cloned()
            .chain(self.images.iter().flatten().cloned())
            .collect()
    }
}

/// Request DTO for creating a listing
///
/// `thumbnail` and `images` are data URLs; every other field is a listing
/// column written as given.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub landlord_id: Uuid,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(flatten)]
    pub columns: Columns,
}

/// Request DTO for editing a listing
#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(flatten)]
    pub columns: Columns,
}

/// Query parameters for browsing available listings
#[derive(Debug, Default, Deserialize)]
pub struct ListingsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListingsQuery {
    /// Requested page size, falling back to `default` and clamped to `1..=max`.
    pub fn effective_limit(&self, default: u32, max: u32) -> u32 {
        self.limit.unwrap_or(default).clamp(1, max)
    }

    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_keeps_untyped_columns() {
        let row = json!({
            "id": "7b6f6a4e-3f1e-4c59-9d4f-4a7f4c1d2e3a",
            "name": "Loft",
            "rent": 1200,
            "status": "occupied",
            "landlord": { "first_name": "Ada" }
        });
        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.status, Some(ListingStatus::Occupied));
        assert!(!listing.is_deletable());

        let back = serde_json::to_value(&listing).unwrap();
        assert_eq!(back["name"], "Loft");
        assert_eq!(back["rent"], 1200);
        assert_eq!(back["landlord"]["first_name"], "Ada");
    }

    #[test]
    fn test_check_listing_status() {
        let mut columns = Columns::new();
        assert!(check_listing_status(&columns).is_ok());

        columns.insert("status".to_string(), json!("unlisted"));
        assert!(check_listing_status(&columns).is_ok());

        columns.insert("status".to_string(), json!("archived"));
        let err = check_listing_status(&columns).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("archived")));

        columns.insert("status".to_string(), json!(null));
        assert!(matches!(
            check_listing_status(&columns),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_image_keys_include_thumbnail_first() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "7b6f6a4e-3f1e-4c59-9d4f-4a7f4c1d2e3a",
            "thumbnail": "a/b/thumbnail.png",
            "images": ["a/b/images/0.png", "a/b/images/1.jpg"]
        }))
        .unwrap();
        assert_eq!(
            listing.image_keys(),
            vec!["a/b/thumbnail.png", "a/b/images/0.png", "a/b/images/1.jpg"]
        );
    }

    #[test]
    fn test_effective_limit() {
        let query = ListingsQuery::default();
        assert_eq!(query.effective_limit(20, 100), 20);

        let query = ListingsQuery {
            limit: Some(500),
            offset: None,
        };
        assert_eq!(query.effective_limit(20, 100), 100);

        let query = ListingsQuery {
            limit: Some(0),
            offset: Some(40),
        };
        assert_eq!(query.effective_limit(20, 100), 1);
        assert_eq!(query.effective_offset(), 40);
    }
}
