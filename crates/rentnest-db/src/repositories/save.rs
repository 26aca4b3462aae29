use std::sync::Arc;

use rentnest_core::{constants::SAVES_TABLE, models::SavedListing, AppError};
use serde_json::json;
use uuid::Uuid;

use crate::store::{Query, RemoteStore, Stored};

/// Repository for the listings a tenant saved
#[derive(Clone)]
pub struct SaveRepository {
    store: Arc<dyn RemoteStore>,
}

impl SaveRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.table = "saves", db.operation = "select"))]
    pub async fn list_for_tenant(&self, tenant_id: Uuid) -> Result<Stored<Vec<SavedListing>>, AppError> {
        let query = Query::new().eq("tenant_ID", tenant_id);
        let response = self.store.select(SAVES_TABLE, &query).await?;
        let status = response.status;
        Ok(Stored {
            status,
            data: response.decode()?,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "saves", db.operation = "insert"))]
    pub async fn create(
        &self,
        listing_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Stored<SavedListing>, AppError> {
        let row = json!({
            "listing_ID": listing_id,
            "tenant_ID": tenant_id,
        });
        let response = self.store.insert(SAVES_TABLE, row).await?;
        let status = response.status;
        Ok(Stored {
            status,
            data: response.decode_single()?,
        })
    }

    /// Delete the saves of a listing, scoped to one tenant when given.
    /// Returns the number of rows removed.
    #[tracing::instrument(skip(self), fields(db.table = "saves", db.operation = "delete"))]
    pub async fn remove(&self, listing_id: Uuid, tenant_id: Option<Uuid>) -> Result<usize, AppError> {
        let mut query = Query::new().eq("listing_ID", listing_id);
        if let Some(tenant_id) = tenant_id {
            query = query.eq("tenant_ID", tenant_id);
        }
        let response = self.store.delete(SAVES_TABLE, &query).await?;
        Ok(response.rows.len())
    }
}
