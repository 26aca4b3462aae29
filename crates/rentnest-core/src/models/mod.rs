//! Data models for the marketplace
//!
//! Rows come back from the remote store as JSON objects. Each model types the
//! columns the API inspects and keeps every other column verbatim in an
//! `extra` map, so responses mirror the remote row shape (embedded relations
//! included).

mod conversation;
mod listing;
mod profile;
mod review;
mod save;
mod tenancy;

pub use conversation::*;
pub use listing::*;
pub use profile::*;
pub use review::*;
pub use save::*;
pub use tenancy::*;

use serde::{Deserialize, Serialize};

/// Free-form columns carried through from a request body or a row.
pub type Columns = serde_json::Map<String, serde_json::Value>;

/// `{ "message": ... }` body used by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
