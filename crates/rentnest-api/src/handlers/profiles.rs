//! Profile endpoints shared by landlords and tenants.

use crate::error::HttpAppError;
use crate::services::profiles;
use crate::state::AppState;
use axum::{response::IntoResponse, Json};
use rentnest_core::{
    constants::RECORD_NOT_FOUND,
    models::{ProfileKind, ProfileUpdateRequest},
    AppError,
};
use uuid::Uuid;

pub(super) async fn check_setup(
    state: &AppState,
    kind: ProfileKind,
    id: Uuid,
) -> Result<impl IntoResponse, HttpAppError> {
    let rows = state.repos.profiles(kind).check_setup(id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(RECORD_NOT_FOUND.to_string()).into());
    }
    Ok(Json(rows))
}

pub(super) async fn get_profile(
    state: &AppState,
    kind: ProfileKind,
    id: Uuid,
) -> Result<impl IntoResponse, HttpAppError> {
    let profile = state
        .repos
        .profiles(kind)
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))?;
    Ok(Json(profile))
}

pub(super) async fn save_profile(
    state: &AppState,
    kind: ProfileKind,
    request: ProfileUpdateRequest,
    complete_setup: bool,
) -> Result<impl IntoResponse, HttpAppError> {
    let profile =
        profiles::save_profile(&state.repos, &state.images, kind, request, complete_setup).await?;
    Ok(Json(profile))
}
