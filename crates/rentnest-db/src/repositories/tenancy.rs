use std::sync::Arc;

use chrono::{DateTime, Utc};
use rentnest_core::{
    constants::TENANCIES_TABLE,
    models::{Columns, CreateTenancyRequest, Tenancy, TenancyStatus},
    AppError,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::store::{Filter, Query, RemoteStore, Stored};

/// Repository for tenancies
#[derive(Clone)]
pub struct TenancyRepository {
    store: Arc<dyn RemoteStore>,
}

impl TenancyRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Insert a tenancy as given; the status is not validated
    #[tracing::instrument(skip(self, request), fields(db.table = "tenancies", db.operation = "insert"))]
    pub async fn create(&self, request: &CreateTenancyRequest) -> Result<Stored<Tenancy>, AppError> {
        let row = json!({
            "landlord_id": request.landlord_id,
            "tenant_id": request.tenant_id,
            "property_id": request.property_id,
            "status": request.status,
            "initiated_by": request.initiated_by,
        });
        let response = self.store.insert(TENANCIES_TABLE, row).await?;
        let status = response.status;
        Ok(Stored {
            status,
            data: response.decode_single()?,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "tenancies", db.operation = "select", db.record_id = %id))]
    pub async fn find(&self, id: Uuid) -> Result<Option<Tenancy>, AppError> {
        let query = Query::new().eq("id", id);
        let tenancy = self
            .store
            .select(TENANCIES_TABLE, &query)
            .await?
            .decode_first()?;
        Ok(tenancy)
    }

    /// Tenancies where the user is either party, with the property embedded
    #[tracing::instrument(skip(self), fields(db.table = "tenancies", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Tenancy>, AppError> {
        let query = Query::new()
            .select("*, property:listings!property_id(*)")
            .or(vec![
                Filter::eq("tenant_id", user_id),
                Filter::eq("landlord_id", user_id),
            ])
            .order("created_at", false);
        let tenancies = self.store.select(TENANCIES_TABLE, &query).await?.decode()?;
        Ok(tenancies)
    }

    /// Write a new status, stamping the start or end date when the status
    /// calls for one.
    #[tracing::instrument(skip(self), fields(db.table = "tenancies", db.operation = "update", db.record_id = %id))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: &TenancyStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Tenancy>, AppError> {
        let mut changes = Columns::new();
        changes.insert("status".to_string(), Value::String(status.to_string()));
        if let Some(column) = status.timestamp_column() {
            changes.insert(column.to_string(), json!(at));
        }

        let query = Query::new().eq("id", id);
        let tenancy = self
            .store
            .update(TENANCIES_TABLE, &query, Value::Object(changes))
            .await?
            .decode_first()?;
        Ok(tenancy)
    }
}
