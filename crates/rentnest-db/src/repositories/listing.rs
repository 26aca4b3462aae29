use std::sync::Arc;

use rentnest_core::{
    constants::LISTINGS_TABLE,
    models::{Columns, Listing, ListingStatus},
    AppError,
};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Query, RemoteStore, Stored};

const WITH_RELATIONS: &str =
    "*, landlord:landlords!landlord_id(*), property_type:property_type!property_type_id(*)";

/// Repository for managing listings
#[derive(Clone)]
pub struct ListingRepository {
    store: Arc<dyn RemoteStore>,
}

impl ListingRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Available listings, newest first
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select"))]
    pub async fn list_available(&self, limit: u32, offset: u32) -> Result<Vec<Listing>, AppError> {
        let query = Query::new()
            .eq("status", ListingStatus::Available)
            .order("created_at", false)
            .limit(limit)
            .offset(offset);
        let listings = self.store.select(LISTINGS_TABLE, &query).await?.decode()?;
        Ok(listings)
    }

    /// Listing with its landlord and property type embedded
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select", db.record_id = %id))]
    pub async fn get_with_relations(&self, id: Uuid) -> Result<Option<Listing>, AppError> {
        let query = Query::new().select(WITH_RELATIONS).eq("id", id);
        let listing = self
            .store
            .select(LISTINGS_TABLE, &query)
            .await?
            .decode_first()?;
        Ok(listing)
    }

    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select", db.record_id = %id))]
    pub async fn find(&self, id: Uuid) -> Result<Option<Listing>, AppError> {
        let query = Query::new().eq("id", id);
        let listing = self
            .store
            .select(LISTINGS_TABLE, &query)
            .await?
            .decode_first()?;
        Ok(listing)
    }

    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select"))]
    pub async fn list_by_landlord(&self, landlord_id: Uuid) -> Result<Stored<Vec<Listing>>, AppError> {
        let query = Query::new()
            .eq("landlord_id", landlord_id)
            .order("created_at", false);
        let response = self.store.select(LISTINGS_TABLE, &query).await?;
        let status = response.status;
        Ok(Stored {
            status,
            data: response.decode()?,
        })
    }

    /// Insert a listing. `status` defaults to available when not supplied.
    #[tracing::instrument(skip(self, columns), fields(db.table = "listings", db.operation = "insert"))]
    pub async fn create(&self, landlord_id: Uuid, mut columns: Columns) -> Result<Listing, AppError> {
        columns.insert("landlord_id".to_string(), Value::String(landlord_id.to_string()));
        columns
            .entry("status".to_string())
            .or_insert_with(|| Value::String(ListingStatus::Available.to_string()));

        let listing = self
            .store
            .insert(LISTINGS_TABLE, Value::Object(columns))
            .await?
            .decode_single()?;
        Ok(listing)
    }

    #[tracing::instrument(skip(self, columns), fields(db.table = "listings", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, columns: Columns) -> Result<Option<Listing>, AppError> {
        let query = Query::new().eq("id", id);
        let listing = self
            .store
            .update(LISTINGS_TABLE, &query, Value::Object(columns))
            .await?
            .decode_first()?;
        Ok(listing)
    }

    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "update", db.record_id = %id))]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ListingStatus,
    ) -> Result<Option<Listing>, AppError> {
        let mut columns = Columns::new();
        columns.insert("status".to_string(), Value::String(status.to_string()));
        self.update(id, columns).await
    }

    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let query = Query::new().eq("id", id);
        self.store.delete(LISTINGS_TABLE, &query).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_defaults_status_to_available() {
        let store = Arc::new(MemoryStore::new());
        let repo = ListingRepository::new(store.clone());
        let landlord_id = Uuid::new_v4();

        let mut columns = Columns::new();
        columns.insert("name".to_string(), json!("Loft"));
        let listing = repo.create(landlord_id, columns).await.unwrap();

        assert_eq!(listing.status, Some(ListingStatus::Available));
        assert_eq!(listing.landlord_id, Some(landlord_id));
        assert_eq!(listing.extra["name"], "Loft");
    }

    #[tokio::test]
    async fn test_list_available_skips_other_statuses() {
        let store = Arc::new(MemoryStore::new());
        let repo = ListingRepository::new(store.clone());
        let landlord_id = Uuid::new_v4();

        let first = repo.create(landlord_id, Columns::new()).await.unwrap();
        let second = repo.create(landlord_id, Columns::new()).await.unwrap();
        let hidden = repo.create(landlord_id, Columns::new()).await.unwrap();
        repo.set_status(hidden.id, ListingStatus::Unlisted)
            .await
            .unwrap();

        let listings = repo.list_available(20, 0).await.unwrap();
        let ids: Vec<Uuid> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
