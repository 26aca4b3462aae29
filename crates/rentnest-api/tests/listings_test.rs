//! Listing API integration tests: browsing and landlord property management.
//!
//! Run with: `cargo test -p rentnest-api --test listings_test`

mod helpers;

use helpers::{setup_test_app, PNG_BYTES, PNG_DATA_URL};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn test_browse_only_available_listings_newest_first() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    let older = app.seed_listing(landlord_id, "available").await;
    app.seed_listing(landlord_id, "occupied").await;
    let newer = app.seed_listing(landlord_id, "available").await;

    let response = app.client().get("/api/listings").await;
    assert_eq!(response.status_code(), 200);

    let ids: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|l| l["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![newer.to_string(), older.to_string()]);
}

#[tokio::test]
async fn test_browse_limit_and_offset() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    for _ in 0..5 {
        app.seed_listing(landlord_id, "available").await;
    }

    let response = app
        .client()
        .get("/api/listings")
        .add_query_param("limit", 2)
        .add_query_param("offset", 4)
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn test_get_listing_embeds_landlord() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    app.seed(
        "landlords",
        json!({ "id": landlord_id, "first_name": "Ada", "account_setup_complete": true }),
    )
    .await;
    let listing_id = app.seed_listing(landlord_id, "available").await;

    let response = app
        .client()
        .get(&format!("/api/listings/{}", listing_id))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<Value>();
    assert_eq!(body["name"], "Garden flat");
    assert_eq!(body["landlord"]["first_name"], "Ada");
}

#[tokio::test]
async fn test_get_unknown_listing_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/api/listings/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["message"], "Record not found");
}

#[tokio::test]
async fn test_create_property_uploads_images() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();

    let response = app
        .client()
        .post("/api/landlord/properties")
        .json(&json!({
            "landlord_id": landlord_id,
            "name": "Canal loft",
            "rent": 1800,
            "thumbnail": PNG_DATA_URL,
            "images": [PNG_DATA_URL, PNG_DATA_URL],
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let body = response.json::<Value>();
    let listing_id = body["id"].as_str().unwrap().to_string();
    let prefix = format!("{}/{}", landlord_id, listing_id);

    assert_eq!(body["status"], "available");
    assert_eq!(body["name"], "Canal loft");
    assert_eq!(body["thumbnail"], format!("{}/thumbnail.png", prefix));
    assert_eq!(
        body["images"],
        json!([
            format!("{}/images/0.png", prefix),
            format!("{}/images/1.png", prefix)
        ])
    );

    let stored = std::fs::read(
        app.storage_root()
            .join("listing-images")
            .join(&prefix)
            .join("thumbnail.png"),
    )
    .unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[tokio::test]
async fn test_create_property_rejects_malformed_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/landlord/properties")
        .json(&json!({
            "landlord_id": Uuid::new_v4(),
            "name": "Broken upload",
            "thumbnail": "https://example.com/not-a-data-url.png",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_landlord_properties_lists_every_status() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    app.seed_listing(landlord_id, "available").await;
    app.seed_listing(landlord_id, "unlisted").await;
    app.seed_listing(Uuid::new_v4(), "available").await;

    let response = app
        .client()
        .get(&format!("/api/landlord/{}/properties", landlord_id))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn test_update_property_columns_and_thumbnail() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    let listing_id = app.seed_listing(landlord_id, "available").await;

    let response = app
        .client()
        .patch(&format!("/api/landlord/properties/{}", listing_id))
        .json(&json!({ "rent": 1500, "status": "unlisted", "thumbnail": PNG_DATA_URL }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<Value>();
    assert_eq!(body["rent"], 1500);
    assert_eq!(body["status"], "unlisted");
    assert_eq!(
        body["thumbnail"],
        format!("{}/{}/thumbnail.png", landlord_id, listing_id)
    );
}

#[tokio::test]
async fn test_update_with_unknown_status_leaves_listing_intact() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();
    let listing_id = app.seed_listing(landlord_id, "unlisted").await;

    let response = app
        .client()
        .patch(&format!("/api/landlord/properties/{}", listing_id))
        .json(&json!({ "status": "archived", "rent": 1 }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");

    let row = app.row("listings", listing_id).await.unwrap();
    assert_eq!(row["status"], "unlisted");
    assert_eq!(row["rent"], 1450);

    let response = app
        .client()
        .get(&format!("/api/landlord/{}/properties", landlord_id))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .client()
        .delete(&format!("/api/landlord/properties/{}", listing_id))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_create_with_unknown_status_inserts_nothing() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/landlord/properties")
        .json(&json!({
            "landlord_id": Uuid::new_v4(),
            "name": "Attic room",
            "status": "archived",
            "thumbnail": PNG_DATA_URL,
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");
    assert!(app.store.rows("listings").await.is_empty());
}

#[tokio::test]
async fn test_update_unknown_property_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .patch(&format!("/api/landlord/properties/{}", Uuid::new_v4()))
        .json(&json!({ "rent": 900 }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_listed_property_is_not_allowed() {
    let app = setup_test_app().await;
    let listing_id = app.seed_listing(Uuid::new_v4(), "occupied").await;

    let response = app
        .client()
        .delete(&format!("/api/landlord/properties/{}", listing_id))
        .await;

    assert_eq!(response.status_code(), 405);
    assert_eq!(
        response.json::<Value>()["message"],
        "Cannot delete a property that is not unlisted"
    );
    assert!(app.row("listings", listing_id).await.is_some());
}

#[tokio::test]
async fn test_delete_unlisted_property_removes_row_and_images() {
    let app = setup_test_app().await;
    let landlord_id = Uuid::new_v4();

    let created = app
        .client()
        .post("/api/landlord/properties")
        .json(&json!({
            "landlord_id": landlord_id,
            "name": "Short let",
            "status": "unlisted",
            "thumbnail": PNG_DATA_URL,
        }))
        .await
        .json::<Value>();
    let listing_id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let thumbnail = app
        .storage_root()
        .join("listing-images")
        .join(created["thumbnail"].as_str().unwrap());
    assert!(thumbnail.exists());

    let response = app
        .client()
        .delete(&format!("/api/landlord/properties/{}", listing_id))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "message": "Delete success." }));
    assert!(app.row("listings", listing_id).await.is_none());
    assert!(!thumbnail.exists());
}

#[tokio::test]
async fn test_delete_unknown_property_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .delete(&format!("/api/landlord/properties/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_lookup_tables() {
    let app = setup_test_app().await;
    app.seed("property_type", json!({ "id": 1, "name": "Apartment" }))
        .await;
    app.seed("occupation", json!({ "id": 1, "name": "Student" }))
        .await;

    let types = app.client().get("/api/property-types").await;
    assert_eq!(types.status_code(), 200);
    assert_eq!(types.json::<Vec<Value>>()[0]["name"], "Apartment");

    let occupations = app.client().get("/api/occupations").await;
    assert_eq!(occupations.json::<Vec<Value>>()[0]["name"], "Student");
}
