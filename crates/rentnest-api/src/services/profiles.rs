//! Landlord and tenant profile writes.

use rentnest_core::{
    constants::RECORD_NOT_FOUND,
    models::{Profile, ProfileKind, ProfileUpdateRequest},
    AppError,
};
use serde_json::Value;

use super::uploads;
use crate::state::{ImageStorage, Repositories};

/// Write profile columns, uploading the picture first when one is supplied.
///
/// `complete_setup` also flips `account_setup_complete` to true.
#[tracing::instrument(skip(repos, images, request), fields(profile = kind.as_str(), id = %request.id))]
pub async fn save_profile(
    repos: &Repositories,
    images: &ImageStorage,
    kind: ProfileKind,
    request: ProfileUpdateRequest,
    complete_setup: bool,
) -> Result<Profile, AppError> {
    let ProfileUpdateRequest {
        id,
        profile_picture,
        mut columns,
    } = request;

    if let Some(data_url) = profile_picture {
        let key = uploads::store_profile_picture(images, id, &data_url).await?;
        columns.insert("profile_picture".to_string(), Value::String(key));
    }
    if complete_setup {
        columns.insert("account_setup_complete".to_string(), Value::Bool(true));
    }

    repos
        .profiles(kind)
        .update(id, columns)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))
}
