//! Remote store abstraction
//!
//! Every repository talks to the managed relational store through the
//! `RemoteStore` trait. The production backend speaks PostgREST over HTTP;
//! the memory backend keeps tables in process for development and tests.

pub mod memory;
pub mod postgrest;
mod query;

pub use memory::{MemoryStore, StoreOperation};
pub use postgrest::PostgrestStore;
pub use query::{Filter, Order, Query};

use async_trait::async_trait;
use rentnest_core::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Remote store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a non-success status
    #[error("{message}")]
    Remote {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Request to remote store failed: {0}")]
    Transport(String),

    #[error("Unexpected response from remote store: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

/// Rows returned by one remote call together with the status it reported.
#[derive(Debug, Clone)]
pub struct StoreResponse {
    pub status: u16,
    pub rows: Vec<Value>,
}

impl StoreResponse {
    pub fn decode<T: DeserializeOwned>(self) -> StoreResult<Vec<T>> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(|e| StoreError::Decode(e.to_string())))
            .collect()
    }

    /// First row, if any.
    pub fn decode_first<T: DeserializeOwned>(self) -> StoreResult<Option<T>> {
        match self.rows.into_iter().next() {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    /// Exactly one row, as returned by a single-row insert.
    pub fn decode_single<T: DeserializeOwned>(self) -> StoreResult<T> {
        let count = self.rows.len();
        if count != 1 {
            return Err(StoreError::Decode(format!(
                "expected a single row, got {}",
                count
            )));
        }
        self.decode_first()?
            .ok_or_else(|| StoreError::Decode("expected a single row, got 0".to_string()))
    }
}

/// Data returned by a repository alongside the status the store reported.
#[derive(Debug, Clone)]
pub struct Stored<T> {
    pub status: u16,
    pub data: T,
}

/// Trait for remote store backends
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> StoreResult<StoreResponse>;

    /// Insert one row (a JSON object) or several (a JSON array). Returns the
    /// inserted rows.
    async fn insert(&self, table: &str, rows: Value) -> StoreResult<StoreResponse>;

    /// Apply `changes` to every row matching `query`. Returns the updated rows.
    async fn update(&self, table: &str, query: &Query, changes: Value)
        -> StoreResult<StoreResponse>;

    /// Delete every row matching `query`. Returns the deleted rows.
    async fn delete(&self, table: &str, query: &Query) -> StoreResult<StoreResponse>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}
