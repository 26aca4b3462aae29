//! Listing lifecycle for landlords: create with images, edit, delete.

use rentnest_core::{
    constants::RECORD_NOT_FOUND,
    models::{check_listing_status, CreateListingRequest, Listing, UpdateListingRequest},
    AppError,
};
use uuid::Uuid;

use super::uploads;
use crate::state::{ImageStorage, Repositories};

pub const NOT_UNLISTED: &str = "Cannot delete a property that is not unlisted";

/// Insert the listing, upload its images under the new id, then write the
/// image keys back.
///
/// The row exists before any image is uploaded; if an upload or the final
/// update fails the listing stays without (some of) its images.
#[tracing::instrument(skip(repos, images, request), fields(landlord_id = %request.landlord_id))]
pub async fn create_listing(
    repos: &Repositories,
    images: &ImageStorage,
    request: CreateListingRequest,
) -> Result<Listing, AppError> {
    let CreateListingRequest {
        landlord_id,
        thumbnail,
        images: gallery,
        mut columns,
    } = request;
    columns.remove("id");
    check_listing_status(&columns)?;

    let listing = repos.listings.create(landlord_id, columns).await?;
    if thumbnail.is_none() && gallery.is_none() {
        return Ok(listing);
    }

    let image_columns = uploads::store_listing_images(
        images,
        landlord_id,
        listing.id,
        thumbnail.as_deref(),
        gallery.as_deref(),
    )
    .await
    .inspect_err(|e| {
        tracing::warn!(listing_id = %listing.id, error = %e, "Listing created but image upload failed");
    })?;

    let updated = repos.listings.update(listing.id, image_columns).await?;
    Ok(updated.unwrap_or(listing))
}

/// Update listing columns, replacing the thumbnail and/or image set when
/// new ones are supplied. Objects no longer referenced are removed.
#[tracing::instrument(skip(repos, images, request))]
pub async fn update_listing(
    repos: &Repositories,
    images: &ImageStorage,
    id: Uuid,
    request: UpdateListingRequest,
) -> Result<Listing, AppError> {
    check_listing_status(&request.columns)?;

    let existing = repos
        .listings
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))?;

    let UpdateListingRequest {
        thumbnail,
        images: gallery,
        mut columns,
    } = request;
    columns.remove("id");

    if thumbnail.is_some() || gallery.is_some() {
        let landlord_id = existing.landlord_id.ok_or_else(|| {
            AppError::BadRequest("Listing has no landlord to store images under".to_string())
        })?;
        let image_columns = uploads::store_listing_images(
            images,
            landlord_id,
            id,
            thumbnail.as_deref(),
            gallery.as_deref(),
        )
        .await?;
        columns.extend(image_columns);
    }

    if columns.is_empty() {
        return Ok(existing);
    }

    let updated = repos
        .listings
        .update(id, columns)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))?;

    let current = updated.image_keys();
    let stale: Vec<String> = existing
        .image_keys()
        .into_iter()
        .filter(|key| !current.contains(key))
        .collect();
    uploads::remove_listing_images(images, id, &stale).await;

    Ok(updated)
}

/// Delete an unlisted listing, then its stored images.
#[tracing::instrument(skip(repos, images))]
pub async fn delete_listing(
    repos: &Repositories,
    images: &ImageStorage,
    id: Uuid,
) -> Result<(), AppError> {
    let listing = repos
        .listings
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))?;

    if !listing.is_deletable() {
        return Err(AppError::MethodNotAllowed(NOT_UNLISTED.to_string()));
    }

    repos.listings.delete(id).await?;
    uploads::remove_listing_images(images, id, &listing.image_keys()).await;

    tracing::info!(listing_id = %id, "Listing deleted");
    Ok(())
}
