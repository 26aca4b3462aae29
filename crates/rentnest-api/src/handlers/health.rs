//! Service routes: banner and health check.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rentnest_core::models::MessageResponse;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

pub const BANNER: &str = "Rental Platform API is running!";

/// Run one dependency check; returns "healthy" or "{prefix}: {error}".
async fn run_check<F, E>(f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match f.await {
        Ok(()) => "healthy".to_string(),
        Err(e) => format!("{}: {}", error_prefix, e),
    }
}

#[derive(serde::Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub store: String,
    pub profile_storage: String,
    pub listing_storage: String,
}

impl HealthCheckResponse {
    fn is_healthy(&self) -> bool {
        [&self.store, &self.profile_storage, &self.listing_storage]
            .iter()
            .all(|check| check.as_str() == "healthy")
    }
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(BANNER))
}

#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = HealthCheckResponse {
        status: "healthy".to_string(),
        store: run_check(state.store.ping(), "unhealthy").await,
        profile_storage: run_check(state.images.profiles.health_check(), "unhealthy").await,
        listing_storage: run_check(state.images.listings.health_check(), "unhealthy").await,
    };

    if response.is_healthy() {
        (StatusCode::OK, Json(response))
    } else {
        tracing::warn!(
            store = %response.store,
            profile_storage = %response.profile_storage,
            listing_storage = %response.listing_storage,
            "Health check failed"
        );
        response.status = "unhealthy".to_string();
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
