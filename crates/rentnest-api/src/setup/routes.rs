//! Route configuration and setup.

use crate::handlers::{app, health, landlord, tenant};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use rentnest_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// A listing carries a thumbnail and an image gallery, all as base64 data URLs.
const MAX_IMAGES_PER_REQUEST: usize = 11;
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(RequestBodyLimitLayer::new(body_limit(config)))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listings", get(app::list_listings))
        .route("/listings/{id}", get(app::get_listing))
        .route(
            "/listings/{id}/reviews",
            get(app::list_reviews).post(app::create_review),
        )
        .route(
            "/listings/{id}/tenancy-status",
            patch(app::update_tenancy_status),
        )
        .route("/property-types", get(app::list_property_types))
        .route("/occupations", get(app::list_occupations))
        .route("/tenancies", post(app::create_tenancy))
        .route("/tenancies/user/{user_id}", get(app::list_user_tenancies))
        .route("/conversations", post(app::create_conversation))
        .route(
            "/conversations/user/{user_id}",
            get(app::list_user_conversations),
        )
        .route(
            "/conversations/{id}/messages",
            get(app::list_messages).post(app::send_message),
        )
        .nest("/landlord", landlord_routes())
        .nest("/tenant", tenant_routes())
}

fn landlord_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check-setup/{id}", get(landlord::check_setup))
        .route("/complete-setup", post(landlord::complete_setup))
        .route("/profile/{id}", get(landlord::get_profile))
        .route("/edit-profile", post(landlord::edit_profile))
        .route("/{id}/properties", get(landlord::list_properties))
        .route("/properties", post(landlord::create_property))
        .route(
            "/properties/{id}",
            patch(landlord::update_property).delete(landlord::delete_property),
        )
}

fn tenant_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/check-setup/{id}", get(tenant::check_setup))
        .route("/complete-setup", post(tenant::complete_setup))
        .route("/profile/{id}", get(tenant::get_profile))
        .route("/edit-profile", post(tenant::edit_profile))
        .route("/saves", post(tenant::save_listing))
        // GET takes a tenant id, DELETE a listing id
        .route(
            "/saves/{id}",
            get(tenant::list_saves).delete(tenant::remove_save),
        )
}

/// Base64 inflates every image by 4/3.
fn body_limit(config: &Config) -> usize {
    let per_image = config.max_upload_size_bytes() / 3 * 4 + 4;
    per_image * MAX_IMAGES_PER_REQUEST + BODY_OVERHEAD_BYTES
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|origin| origin == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentnest_core::{BaseConfig, MarketplaceConfig};

    #[test]
    fn test_body_limit_fits_a_full_listing() {
        let config = Config(Box::default());
        let encoded_image = config.max_upload_size_bytes() * 4 / 3;
        assert!(body_limit(&config) > encoded_image * MAX_IMAGES_PER_REQUEST);
    }

    #[test]
    fn test_invalid_cors_origin_is_rejected() {
        let config = Config(Box::new(MarketplaceConfig {
            base: BaseConfig {
                server_port: 5000,
                cors_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
                environment: "development".to_string(),
            },
            ..Default::default()
        }));
        assert!(setup_cors(&config).is_err());
    }
}
