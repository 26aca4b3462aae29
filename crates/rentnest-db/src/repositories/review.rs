use std::sync::Arc;

use rentnest_core::{
    constants::REVIEWS_TABLE,
    models::{CreateReviewRequest, Review},
    AppError,
};
use serde_json::json;
use uuid::Uuid;

use crate::store::{Query, RemoteStore, Stored};

#[derive(Clone)]
pub struct ReviewRepository {
    store: Arc<dyn RemoteStore>,
}

impl ReviewRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Every review of a listing. Unpaginated.
    #[tracing::instrument(skip(self), fields(db.table = "reviews", db.operation = "select"))]
    pub async fn list_for_listing(&self, listing_id: Uuid) -> Result<Vec<Review>, AppError> {
        let query = Query::new()
            .eq("listing_id", listing_id)
            .order("created_at", false);
        let reviews = self.store.select(REVIEWS_TABLE, &query).await?.decode()?;
        Ok(reviews)
    }

    #[tracing::instrument(skip(self, request), fields(db.table = "reviews", db.operation = "insert"))]
    pub async fn create(
        &self,
        listing_id: Uuid,
        request: &CreateReviewRequest,
    ) -> Result<Stored<Review>, AppError> {
        let row = json!({
            "listing_id": listing_id,
            "tenant_id": request.tenant_id,
            "content": request.content,
            "rating": request.rating,
        });
        let response = self.store.insert(REVIEWS_TABLE, row).await?;
        let status = response.status;
        Ok(Stored {
            status,
            data: response.decode_single()?,
        })
    }
}
