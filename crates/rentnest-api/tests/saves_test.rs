//! Saved-listing API integration tests.
//!
//! Run with: `cargo test -p rentnest-api --test saves_test`

mod helpers;

use helpers::setup_test_app;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_save_list_and_remove() {
    let app = setup_test_app().await;
    let tenant_id = Uuid::new_v4();
    let listing_id = app.seed_listing(Uuid::new_v4(), "available").await;
    let other_listing = app.seed_listing(Uuid::new_v4(), "available").await;

    for listing in [listing_id, other_listing] {
        let response = app
            .client()
            .post("/api/tenant/saves")
            .json(&json!({ "listing_ID": listing, "user_ID": tenant_id }))
            .await;
        assert_eq!(response.status_code(), 201);
        let save = response.json::<Value>();
        assert_eq!(save["listing_ID"], listing.to_string());
        assert_eq!(save["tenant_ID"], tenant_id.to_string());
    }

    let response = app
        .client()
        .get(&format!("/api/tenant/saves/{}", tenant_id))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Vec<Value>>().len(), 2);

    let response = app
        .client()
        .delete(&format!("/api/tenant/saves/{}", listing_id))
        .add_query_param("user_ID", tenant_id)
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "message": "Delete success." }));

    let remaining = app
        .client()
        .get(&format!("/api/tenant/saves/{}", tenant_id))
        .await
        .json::<Vec<Value>>();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["listing_ID"], other_listing.to_string());
}

#[tokio::test]
async fn test_remove_is_scoped_to_the_tenant() {
    let app = setup_test_app().await;
    let listing_id = app.seed_listing(Uuid::new_v4(), "available").await;
    let first_tenant = Uuid::new_v4();
    let second_tenant = Uuid::new_v4();
    for tenant in [first_tenant, second_tenant] {
        app.seed(
            "saves",
            json!({ "listing_ID": listing_id, "tenant_ID": tenant }),
        )
        .await;
    }

    let response = app
        .client()
        .delete(&format!("/api/tenant/saves/{}", listing_id))
        .add_query_param("user_ID", first_tenant)
        .await;
    assert_eq!(response.status_code(), 200);

    let saves = app.store.rows("saves").await;
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0]["tenant_ID"], second_tenant.to_string());
}

#[tokio::test]
async fn test_save_requires_ids() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/tenant/saves")
        .json(&json!({ "listing_ID": "not-a-uuid" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");
}
