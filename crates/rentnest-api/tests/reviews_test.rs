//! Review API integration tests.
//!
//! Run with: `cargo test -p rentnest-api --test reviews_test`

mod helpers;

use helpers::setup_test_app;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_review_summary_averages_ratings() {
    let app = setup_test_app().await;
    let listing_id = app.seed_listing(Uuid::new_v4(), "available").await;

    for rating in [4, 5, 3] {
        let response = app
            .client()
            .post(&format!("/api/listings/{}/reviews", listing_id))
            .json(&json!({
                "tenant_id": Uuid::new_v4(),
                "content": "Quiet street, responsive landlord",
                "rating": rating,
            }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = app
        .client()
        .get(&format!("/api/listings/{}/reviews", listing_id))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<Value>();
    assert_eq!(body["rating"], 4.0);
    assert_eq!(body["reviewLength"], 3);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_review_summary_rounds_to_two_decimals() {
    let app = setup_test_app().await;
    let listing_id = app.seed_listing(Uuid::new_v4(), "available").await;
    let other_listing = app.seed_listing(Uuid::new_v4(), "available").await;

    for (listing, rating) in [(listing_id, 4), (listing_id, 4), (listing_id, 5), (other_listing, 1)] {
        app.seed(
            "reviews",
            json!({ "listing_id": listing, "tenant_id": Uuid::new_v4(), "rating": rating }),
        )
        .await;
    }

    let body = app
        .client()
        .get(&format!("/api/listings/{}/reviews", listing_id))
        .await
        .json::<Value>();
    assert_eq!(body["rating"], 4.33);
    assert_eq!(body["reviewLength"], 3);
}

#[tokio::test]
async fn test_listing_without_reviews_rates_zero() {
    let app = setup_test_app().await;
    let listing_id = app.seed_listing(Uuid::new_v4(), "available").await;

    let response = app
        .client()
        .get(&format!("/api/listings/{}/reviews", listing_id))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({ "reviews": [], "rating": 0.0, "reviewLength": 0 })
    );
}
