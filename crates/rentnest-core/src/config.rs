//! Configuration module
//!
//! Settings are read from the process environment (after loading `.env` via
//! dotenvy) with development-friendly defaults. The remote store and the
//! object storage buckets are configured here; everything else about them is
//! owned by the managed service.

use std::env;

use crate::backends::{StorageBackend, StoreBackend};

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const MAX_UPLOAD_SIZE_LIMIT_MB: usize = 1024;
const LISTINGS_DEFAULT_LIMIT: u32 = 20;
const LISTINGS_MAX_LIMIT: u32 = 100;
const PROFILE_BUCKET: &str = "profile-pictures";
const LISTING_BUCKET: &str = "listing-images";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Marketplace configuration: remote store, buckets and listing limits
#[derive(Clone, Debug)]
pub struct MarketplaceConfig {
    pub base: BaseConfig,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub storage_backend: StorageBackend,
    pub profile_bucket: String,
    pub listing_bucket: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub max_upload_size_bytes: usize,
    pub listings_default_limit: u32,
    pub listings_max_limit: u32,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MarketplaceConfig>);

impl Config {
    fn inner(&self) -> &MarketplaceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = MarketplaceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.inner().store_backend
    }

    pub fn supabase_url(&self) -> Option<&str> {
        self.inner().supabase_url.as_deref()
    }

    pub fn supabase_service_key(&self) -> Option<&str> {
        self.inner().supabase_service_key.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn profile_bucket(&self) -> &str {
        &self.inner().profile_bucket
    }

    pub fn listing_bucket(&self) -> &str {
        &self.inner().listing_bucket
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn listings_default_limit(&self) -> u32 {
        self.inner().listings_default_limit
    }

    pub fn listings_max_limit(&self) -> u32 {
        self.inner().listings_max_limit
    }
}

impl Default for MarketplaceConfig {
    /// Development defaults: in-memory store, local storage under the temp dir.
    fn default() -> Self {
        let local_path = env::temp_dir().join("rentnest-storage");
        Self {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
            },
            store_backend: StoreBackend::Memory,
            supabase_url: None,
            supabase_service_key: None,
            storage_backend: StorageBackend::Local,
            profile_bucket: PROFILE_BUCKET.to_string(),
            listing_bucket: LISTING_BUCKET.to_string(),
            local_storage_path: Some(local_path.to_string_lossy().to_string()),
            local_storage_base_url: Some(format!("http://localhost:{}/storage", SERVER_PORT)),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            listings_default_limit: LISTINGS_DEFAULT_LIMIT,
            listings_max_limit: LISTINGS_MAX_LIMIT,
        }
    }
}

impl MarketplaceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Remote,
        };

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Remote,
        };

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = MarketplaceConfig {
            base,
            store_backend,
            supabase_url: env::var("SUPABASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches('/').to_string()),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            storage_backend,
            profile_bucket: env::var("PROFILE_BUCKET")
                .unwrap_or_else(|_| PROFILE_BUCKET.to_string()),
            listing_bucket: env::var("LISTING_BUCKET")
                .unwrap_or_else(|_| LISTING_BUCKET.to_string()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            max_upload_size_bytes: upload_size_bytes(max_upload_size_mb)?,
            listings_default_limit: env::var("LISTINGS_DEFAULT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(LISTINGS_DEFAULT_LIMIT),
            listings_max_limit: env::var("LISTINGS_MAX_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(LISTINGS_MAX_LIMIT),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let needs_supabase = self.store_backend == StoreBackend::Remote
            || self.storage_backend == StorageBackend::Remote;
        if needs_supabase {
            if self.supabase_url.is_none() {
                return Err(anyhow::anyhow!(
                    "SUPABASE_URL must be set when using the remote store or remote storage"
                ));
            }
            if self.supabase_service_key.is_none() {
                return Err(anyhow::anyhow!(
                    "SUPABASE_SERVICE_KEY must be set when using the remote store or remote storage"
                ));
            }
        }

        if let Some(url) = &self.supabase_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("SUPABASE_URL must be an http(s) URL"));
            }
        }

        if self.storage_backend == StorageBackend::Local {
            if self.local_storage_path.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_PATH must be set when using local storage backend"
                ));
            }
            if self.local_storage_base_url.is_none() {
                return Err(anyhow::anyhow!(
                    "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                ));
            }
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB cannot be 0"));
        }

        if self.max_upload_size_bytes > MAX_UPLOAD_SIZE_LIMIT_MB * 1024 * 1024 {
            return Err(anyhow::anyhow!(
                "MAX_UPLOAD_SIZE_MB cannot exceed {}",
                MAX_UPLOAD_SIZE_LIMIT_MB
            ));
        }

        if self.listings_default_limit == 0 || self.listings_max_limit == 0 {
            return Err(anyhow::anyhow!("Listing limits cannot be 0"));
        }

        if self.listings_default_limit > self.listings_max_limit {
            return Err(anyhow::anyhow!(
                "LISTINGS_DEFAULT_LIMIT cannot exceed LISTINGS_MAX_LIMIT"
            ));
        }

        Ok(())
    }
}

/// Megabytes to bytes, failing instead of wrapping.
fn upload_size_bytes(mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", mb))
}
