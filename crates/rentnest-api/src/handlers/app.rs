//! Listings, reviews, tenancies, conversations and lookup tables.

use crate::error::{HttpAppError, ValidatedJson};
use crate::services::{conversation, tenancy};
use crate::state::{AppState, Repositories};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rentnest_core::{
    constants::RECORD_NOT_FOUND,
    models::{
        CreateConversationRequest, CreateReviewRequest, CreateTenancyRequest, ListingsQuery,
        ReviewSummary, SendMessageRequest, TenancyStatusUpdate,
    },
    AppError,
};
use std::sync::Arc;
use uuid::Uuid;

use super::remote_status;

#[tracing::instrument(skip(state))]
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let limit = query.effective_limit(
        state.config.listings_default_limit(),
        state.config.listings_max_limit(),
    );
    let listings = state
        .repos
        .listings
        .list_available(limit, query.effective_offset())
        .await?;
    Ok(Json(listings))
}

#[tracing::instrument(skip(repos))]
pub async fn get_listing(
    State(repos): State<Repositories>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let listing = repos
        .listings
        .get_with_relations(id)
        .await?
        .ok_or_else(|| AppError::NotFound(RECORD_NOT_FOUND.to_string()))?;
    Ok(Json(listing))
}

#[tracing::instrument(skip(repos))]
pub async fn list_reviews(
    State(repos): State<Repositories>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let reviews = repos.reviews.list_for_listing(listing_id).await?;
    Ok(Json(ReviewSummary::from_reviews(reviews)))
}

#[tracing::instrument(skip(repos, request))]
pub async fn create_review(
    State(repos): State<Repositories>,
    Path(listing_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stored = repos.reviews.create(listing_id, &request).await?;
    Ok((remote_status(stored.status), Json(stored.data)))
}

#[tracing::instrument(skip(repos, update))]
pub async fn update_tenancy_status(
    State(repos): State<Repositories>,
    Path(listing_id): Path<Uuid>,
    ValidatedJson(update): ValidatedJson<TenancyStatusUpdate>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = tenancy::transition_status(&repos, listing_id, update).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip(repos, request))]
pub async fn create_tenancy(
    State(repos): State<Repositories>,
    ValidatedJson(request): ValidatedJson<CreateTenancyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let stored = repos.tenancies.create(&request).await?;
    Ok((remote_status(stored.status), Json(stored.data)))
}

#[tracing::instrument(skip(repos))]
pub async fn list_user_tenancies(
    State(repos): State<Repositories>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tenancies = repos.tenancies.list_for_user(user_id).await?;
    Ok(Json(tenancies))
}

#[tracing::instrument(skip(repos, request))]
pub async fn create_conversation(
    State(repos): State<Repositories>,
    ValidatedJson(request): ValidatedJson<CreateConversationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let conversation = conversation::start_conversation(&repos, request).await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

#[tracing::instrument(skip(repos))]
pub async fn list_user_conversations(
    State(repos): State<Repositories>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let conversations = repos.conversations.list_for_user(user_id).await?;
    Ok(Json(conversations))
}

#[tracing::instrument(skip(repos, request))]
pub async fn send_message(
    State(repos): State<Repositories>,
    Path(conversation_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let message = conversation::send_message(&repos, conversation_id, request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[tracing::instrument(skip(repos))]
pub async fn list_messages(
    State(repos): State<Repositories>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let messages = repos.messages.list_for_conversation(conversation_id).await?;
    Ok(Json(messages))
}

pub async fn list_property_types(
    State(repos): State<Repositories>,
) -> Result<impl IntoResponse, HttpAppError> {
    Ok(Json(repos.lookups.property_types().await?))
}

pub async fn list_occupations(
    State(repos): State<Repositories>,
) -> Result<impl IntoResponse, HttpAppError> {
    Ok(Json(repos.lookups.occupations().await?))
}
