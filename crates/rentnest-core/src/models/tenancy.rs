use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Columns;

/// Status of a tenancy.
///
/// `Pending`, `Active` and `Ended` are the values the API knows about; any
/// other caller-supplied string is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TenancyStatus {
    Pending,
    Active,
    Ended,
    Other(String),
}

impl TenancyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TenancyStatus::Pending => "pending",
            TenancyStatus::Active => "active",
            TenancyStatus::Ended => "ended",
            TenancyStatus::Other(value) => value,
        }
    }

    /// Timestamp column stamped when a tenancy enters this status.
    pub fn timestamp_column(&self) -> Option<&'static str> {
        match self {
            TenancyStatus::Active => Some("start_date"),
            TenancyStatus::Ended => Some("end_date"),
            _ => None,
        }
    }
}

impl From<String> for TenancyStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => TenancyStatus::Pending,
            "active" => TenancyStatus::Active,
            "ended" => TenancyStatus::Ended,
            _ => TenancyStatus::Other(value),
        }
    }
}

impl From<&str> for TenancyStatus {
    fn from(value: &str) -> Self {
        TenancyStatus::from(value.to_string())
    }
}

impl From<TenancyStatus> for String {
    fn from(status: TenancyStatus) -> Self {
        match status {
            TenancyStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TenancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An occupancy agreement between a landlord and a tenant for one listing.
///
/// `start_date` and `end_date` are stamped only on the transitions into
/// active and ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenancy {
    pub id: Uuid,
    #[serde(default)]
    pub landlord_id: Option<Uuid>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub property_id: Option<Uuid>,
    pub status: TenancyStatus,
    #[serde(flatten)]
    pub extra: Columns,
}

/// Request DTO for creating a tenancy. The status is not validated.
#[derive(Debug, Deserialize)]
pub struct CreateTenancyRequest {
    pub landlord_id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub status: TenancyStatus,
    #[serde(default)]
    pub initiated_by: Option<Uuid>,
}

/// Body of `PATCH /api/listings/{id}/tenancy-status`
#[derive(Debug, Deserialize)]
pub struct TenancyStatusUpdate {
    pub tenancy_id: Uuid,
    pub status: TenancyStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TenancyStatusResponse {
    pub status: TenancyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_parse() {
        let status: TenancyStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, TenancyStatus::Active);
        let status: TenancyStatus = serde_json::from_str("\"ended\"").unwrap();
        assert_eq!(status, TenancyStatus::Ended);
    }

    #[test]
    fn test_unknown_status_is_carried_verbatim() {
        let status: TenancyStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status, TenancyStatus::Other("on-hold".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"on-hold\"");
        assert_eq!(status.timestamp_column(), None);
    }

    #[test]
    fn test_timestamp_columns() {
        assert_eq!(TenancyStatus::Active.timestamp_column(), Some("start_date"));
        assert_eq!(TenancyStatus::Ended.timestamp_column(), Some("end_date"));
        assert_eq!(TenancyStatus::Pending.timestamp_column(), None);
    }
}
