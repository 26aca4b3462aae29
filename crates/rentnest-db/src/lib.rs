//! Remote store access for the rental marketplace
//!
//! `store` holds the `RemoteStore` trait with its PostgREST and in-memory
//! backends. `repositories` wraps it with one repository per table group;
//! each repository method issues one remote call.

pub mod repositories;
pub mod store;

pub use repositories::{
    ConversationRepository, ListingRepository, LookupRepository, MessageRepository,
    ProfileRepository, ReviewRepository, SaveRepository, TenancyRepository,
};
pub use store::{
    Filter, MemoryStore, PostgrestStore, Query, RemoteStore, StoreError,
    StoreOperation, StoreResponse, StoreResult, Stored,
};
