use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;

/// A listing a tenant bookmarked. Column names follow the remote schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedListing {
    pub id: Uuid,
    #[serde(rename = "listing_ID")]
    pub listing_id: Uuid,
    #[serde(rename = "tenant_ID")]
    pub tenant_id: Uuid,
    #[serde(flatten)]
    pub extra: Columns,
}

#[derive(Debug, Deserialize)]
pub struct SaveListingRequest {
    #[serde(rename = "listing_ID")]
    pub listing_id: Uuid,
    #[serde(rename = "user_ID")]
    pub user_id: Uuid,
}

/// Query of `DELETE /api/tenant/saves/{listing_id}`
#[derive(Debug, Default, Deserialize)]
pub struct RemoveSaveQuery {
    #[serde(rename = "user_ID", default)]
    pub user_id: Option<Uuid>,
}
