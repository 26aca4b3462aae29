//! Table names and other fixed identifiers of the remote schema.

pub const LISTINGS_TABLE: &str = "listings";
pub const TENANCIES_TABLE: &str = "tenancies";
pub const CONVERSATIONS_TABLE: &str = "conversations";
pub const MESSAGES_TABLE: &str = "messages";
pub const REVIEWS_TABLE: &str = "reviews";
pub const SAVES_TABLE: &str = "saves";
pub const LANDLORDS_TABLE: &str = "landlords";
pub const TENANTS_TABLE: &str = "tenants";
pub const PROPERTY_TYPE_TABLE: &str = "property_type";
pub const OCCUPATION_TABLE: &str = "occupation";

/// Message returned by the 404 special case of the profile lookups.
pub const RECORD_NOT_FOUND: &str = "Record not found";

/// Message returned after any successful delete.
pub const DELETE_SUCCESS: &str = "Delete success.";
