//! Landlord profile and property management.

use super::{profiles, remote_status};
use crate::error::{HttpAppError, ValidatedJson};
use crate::services::listings;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rentnest_core::{
    constants::DELETE_SUCCESS,
    models::{
        CreateListingRequest, MessageResponse, ProfileKind, ProfileUpdateRequest,
        UpdateListingRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(skip(state))]
pub async fn check_setup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::check_setup(&state, ProfileKind::Landlord, id).await
}

#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn complete_setup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::save_profile(&state, ProfileKind::Landlord, request, true).await
}

#[tracing::instrument(skip(state))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::get_profile(&state, ProfileKind::Landlord, id).await
}

#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::save_profile(&state, ProfileKind::Landlord, request, false).await
}

#[tracing::instrument(skip(state))]
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Path(landlord_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stored = state.repos.listings.list_by_landlord(landlord_id).await?;
    Ok((remote_status(stored.status), Json(stored.data)))
}

#[tracing::instrument(skip(state, request), fields(landlord_id = %request.landlord_id))]
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateListingRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let listing = listings::create_listing(&state.repos, &state.images, request).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateListingRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let listing = listings::update_listing(&state.repos, &state.images, id, request).await?;
    Ok(Json(listing))
}

#[tracing::instrument(skip(state))]
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    listings::delete_listing(&state.repos, &state.images, id).await?;
    Ok(Json(MessageResponse::new(DELETE_SUCCESS)))
}
