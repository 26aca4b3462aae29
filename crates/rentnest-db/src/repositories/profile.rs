use std::sync::Arc;

use rentnest_core::{
    models::{Columns, Profile, ProfileKind, SetupStatus},
    AppError,
};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Query, RemoteStore};

/// Repository for landlord or tenant profiles, depending on `kind`
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn RemoteStore>,
    kind: ProfileKind,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn RemoteStore>, kind: ProfileKind) -> Self {
        Self { store, kind }
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    #[tracing::instrument(skip(self), fields(db.table = self.kind.table(), db.operation = "select", db.record_id = %id))]
    pub async fn check_setup(&self, id: Uuid) -> Result<Vec<SetupStatus>, AppError> {
        let query = Query::new().select("account_setup_complete").eq("id", id);
        let rows = self
            .store
            .select(self.kind.table(), &query)
            .await?
            .decode()?;
        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = self.kind.table(), db.operation = "select", db.record_id = %id))]
    pub async fn find(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let query = Query::new().eq("id", id);
        let profile = self
            .store
            .select(self.kind.table(), &query)
            .await?
            .decode_first()?;
        Ok(profile)
    }

    /// Write the given columns. Returns `None` when no profile has this id.
    #[tracing::instrument(skip(self, columns), fields(db.table = self.kind.table(), db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, mut columns: Columns) -> Result<Option<Profile>, AppError> {
        columns.remove("id");
        let query = Query::new().eq("id", id);
        let profile = self
            .store
            .update(self.kind.table(), &query, Value::Object(columns))
            .await?
            .decode_first()?;
        Ok(profile)
    }
}
