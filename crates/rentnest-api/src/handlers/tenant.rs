//! Tenant profile and saved listings.

use super::{profiles, remote_status};
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::{AppState, Repositories};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use rentnest_core::{
    constants::DELETE_SUCCESS,
    models::{MessageResponse, ProfileKind, ProfileUpdateRequest, RemoveSaveQuery, SaveListingRequest},
};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(skip(state))]
pub async fn check_setup(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::check_setup(&state, ProfileKind::Tenant, id).await
}

#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn complete_setup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::save_profile(&state, ProfileKind::Tenant, request, true).await
}

#[tracing::instrument(skip(state))]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::get_profile(&state, ProfileKind::Tenant, id).await
}

#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    profiles::save_profile(&state, ProfileKind::Tenant, request, false).await
}

#[tracing::instrument(skip(repos))]
pub async fn list_saves(
    State(repos): State<Repositories>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stored = repos.saves.list_for_tenant(tenant_id).await?;
    Ok((remote_status(stored.status), Json(stored.data)))
}

#[tracing::instrument(skip(repos, request), fields(listing_id = %request.listing_id))]
pub async fn save_listing(
    State(repos): State<Repositories>,
    ValidatedJson(request): ValidatedJson<SaveListingRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stored = repos
        .saves
        .create(request.listing_id, request.user_id)
        .await?;
    Ok((remote_status(stored.status), Json(stored.data)))
}

#[tracing::instrument(skip(repos))]
pub async fn remove_save(
    State(repos): State<Repositories>,
    Path(listing_id): Path<Uuid>,
    Query(query): Query<RemoveSaveQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let removed = repos.saves.remove(listing_id, query.user_id).await?;
    tracing::debug!(removed, "Saved listings removed");
    Ok(Json(MessageResponse::new(DELETE_SUCCESS)))
}
