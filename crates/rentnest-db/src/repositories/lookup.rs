use std::sync::Arc;

use rentnest_core::{
    constants::{OCCUPATION_TABLE, PROPERTY_TYPE_TABLE},
    AppError,
};
use serde_json::Value;

use crate::store::{Query, RemoteStore};

/// Read-only lookup tables, returned row for row
#[derive(Clone)]
pub struct LookupRepository {
    store: Arc<dyn RemoteStore>,
}

impl LookupRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.table = "property_type", db.operation = "select"))]
    pub async fn property_types(&self) -> Result<Vec<Value>, AppError> {
        let query = Query::new().select("*");
        Ok(self.store.select(PROPERTY_TYPE_TABLE, &query).await?.rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "occupation", db.operation = "select"))]
    pub async fn occupations(&self) -> Result<Vec<Value>, AppError> {
        let query = Query::new().select("*");
        Ok(self.store.select(OCCUPATION_TABLE, &query).await?.rows)
    }
}
