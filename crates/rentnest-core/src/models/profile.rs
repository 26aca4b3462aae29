use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;
use crate::constants::{LANDLORDS_TABLE, TENANTS_TABLE};

/// Which side of the marketplace a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Landlord,
    Tenant,
}

impl ProfileKind {
    pub fn table(&self) -> &'static str {
        match self {
            ProfileKind::Landlord => LANDLORDS_TABLE,
            ProfileKind::Tenant => TENANTS_TABLE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Landlord => "landlord",
            ProfileKind::Tenant => "tenant",
        }
    }
}

/// Landlord or tenant profile row. `id` is the identity-provider user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub account_setup_complete: Option<bool>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub extra: Columns,
}

/// Row shape returned by the check-setup endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupStatus {
    #[serde(default)]
    pub account_setup_complete: Option<bool>,
}

impl SetupStatus {
    pub fn is_complete(&self) -> bool {
        self.account_setup_complete.unwrap_or(false)
    }
}

/// Body of the complete-setup and edit-profile endpoints.
///
/// `profile_picture`, when present, is a data URL; the remaining fields are
/// profile columns written as given.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub id: Uuid,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub columns: Columns,
}
