//! Tenancy status transitions.
//!
//! Moving a tenancy to `active` or `ended` also moves its listing to
//! `occupied` or `unlisted`. The listing is written first, then the tenancy.
//! If the tenancy write fails the listing keeps its new status; nothing is
//! rolled back, and the mismatch is logged with both ids.

use chrono::Utc;
use rentnest_core::{
    models::{ListingStatus, TenancyStatus, TenancyStatusResponse, TenancyStatusUpdate},
    AppError,
};
use uuid::Uuid;

use crate::state::Repositories;

/// Listing status implied by a tenancy status, if any.
pub fn listing_status_for(status: &TenancyStatus) -> Option<ListingStatus> {
    match status {
        TenancyStatus::Active => Some(ListingStatus::Occupied),
        TenancyStatus::Ended => Some(ListingStatus::Unlisted),
        _ => None,
    }
}

#[tracing::instrument(skip(repos, update), fields(tenancy_id = %update.tenancy_id, status = %update.status))]
pub async fn transition_status(
    repos: &Repositories,
    listing_id: Uuid,
    update: TenancyStatusUpdate,
) -> Result<TenancyStatusResponse, AppError> {
    let listing_status = listing_status_for(&update.status);

    if let Some(listing_status) = listing_status {
        if repos
            .listings
            .set_status(listing_id, listing_status)
            .await?
            .is_none()
        {
            tracing::debug!(listing_id = %listing_id, "No listing matched the status update");
        }
    }

    let tenancy = repos
        .tenancies
        .update_status(update.tenancy_id, &update.status, Utc::now())
        .await
        .map_err(|e| {
            if let Some(listing_status) = listing_status {
                tracing::warn!(
                    listing_id = %listing_id,
                    tenancy_id = %update.tenancy_id,
                    listing_status = %listing_status,
                    error = %e,
                    "Tenancy update failed after the listing was updated; listing keeps its new status"
                );
            }
            e
        })?;

    if tenancy.is_none() {
        tracing::debug!(tenancy_id = %update.tenancy_id, "No tenancy matched the status update");
    }

    Ok(TenancyStatusResponse {
        status: update.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_status_for() {
        assert_eq!(
            listing_status_for(&TenancyStatus::Active),
            Some(ListingStatus::Occupied)
        );
        assert_eq!(
            listing_status_for(&TenancyStatus::Ended),
            Some(ListingStatus::Unlisted)
        );
        assert_eq!(listing_status_for(&TenancyStatus::Pending), None);
        assert_eq!(
            listing_status_for(&TenancyStatus::from("terminated")),
            None
        );
    }
}
