//! Test helpers: build AppState and router for integration tests.
//!
//! The router is the one the binary serves, backed by the in-memory store and
//! local image storage in a temporary directory.

#![allow(dead_code)]

use axum_test::TestServer;
use rentnest_api::setup::routes;
use rentnest_api::state::AppState;
use rentnest_core::{Config, MarketplaceConfig};
use rentnest_db::MemoryStore;
use rentnest_storage::{LocalStorage, Storage};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const STORAGE_BASE_URL: &str = "http://localhost:5000/storage";

/// Decodes to the bytes `not really a png`.
pub const PNG_DATA_URL: &str = "data:image/png;base64,bm90IHJlYWxseSBhIHBuZw==";
pub const PNG_BYTES: &[u8] = b"not really a png";

/// Test application: server, the store behind it, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage_root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Current row of `table` with the given id.
    pub async fn row(&self, table: &str, id: Uuid) -> Option<Value> {
        let id = id.to_string();
        self.store
            .rows(table)
            .await
            .into_iter()
            .find(|row| row["id"].as_str() == Some(id.as_str()))
    }

    pub async fn seed(&self, table: &str, row: Value) -> Value {
        self.store
            .seed(table, vec![row])
            .await
            .expect("Failed to seed row")
            .remove(0)
    }

    pub async fn seed_listing(&self, landlord_id: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.seed(
            "listings",
            json!({
                "id": id,
                "landlord_id": landlord_id,
                "name": "Garden flat",
                "rent": 1450,
                "status": status,
            }),
        )
        .await;
        id
    }
}

pub fn test_config(storage_root: &Path) -> Config {
    Config(Box::new(MarketplaceConfig {
        local_storage_path: Some(storage_root.to_string_lossy().to_string()),
        local_storage_base_url: Some(STORAGE_BASE_URL.to_string()),
        ..Default::default()
    }))
}

/// Setup test app with an empty in-memory store and local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(temp_dir.path());

    let store = Arc::new(MemoryStore::new());
    let profile_images: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.profile_bucket(), temp_dir.path(), STORAGE_BASE_URL)
            .await
            .expect("Failed to create profile storage"),
    );
    let listing_images: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.listing_bucket(), temp_dir.path(), STORAGE_BASE_URL)
            .await
            .expect("Failed to create listing storage"),
    );

    let state = Arc::new(AppState::new(
        config.clone(),
        store.clone(),
        profile_images,
        listing_images,
    ));

    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        state,
        _temp_dir: temp_dir,
    }
}
