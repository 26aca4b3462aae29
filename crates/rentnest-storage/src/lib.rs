//! Rentnest Storage Library
//!
//! Object storage for profile pictures and listing images. It includes the
//! Storage trait and implementations for the managed bucket service and the
//! local filesystem.
//!
//! # Storage key format
//!
//! One `Storage` instance serves one bucket. Keys are scoped by owner:
//!
//! - **Profile bucket**: `{owner_id}/profile_picture.{ext}`
//! - **Listing bucket**: `{landlord_id}/{listing_id}/thumbnail.{ext}` and
//!   `{landlord_id}/{listing_id}/images/{index}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod data_url;
pub mod factory;
pub mod keys;
pub mod local;
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use data_url::DataUrl;
pub use factory::create_storage;
pub use local::LocalStorage;
pub use remote::RemoteStorage;
pub use rentnest_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
