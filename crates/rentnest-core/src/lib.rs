//! Rentnest Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the store, storage and API crates.

pub mod backends;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use backends::{StorageBackend, StoreBackend};
pub use config::{BaseConfig, Config, MarketplaceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
