//! Configuration validation
//!
//! Re-checks configuration at startup so a misconfigured process never
//! starts serving.

use anyhow::Result;
use rentnest_core::{Config, StorageBackend, StoreBackend};

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();
    let env_var = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .ok();

    if is_production && env_var.is_none() {
        tracing::warn!(
            "Production mode detected but ENVIRONMENT/APP_ENV not set - error details may leak"
        );
    }

    if is_production {
        if config.cors_origins().iter().any(|origin| origin == "*") {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production. \
                Please set specific allowed origins via CORS_ORIGINS environment variable."
            ));
        }

        if config.store_backend() == StoreBackend::Memory {
            return Err(anyhow::anyhow!(
                "The in-memory store cannot be used in production"
            ));
        }

        if config.storage_backend() == StorageBackend::Local {
            tracing::warn!("Local image storage in production - files are not replicated");
        }
    }

    if config.profile_bucket() == config.listing_bucket() {
        tracing::warn!(
            bucket = config.profile_bucket(),
            "Profile pictures and listing images share one bucket"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentnest_core::{BaseConfig, MarketplaceConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config(Box::default())).is_ok());
    }

    #[test]
    fn test_production_rejects_memory_store() {
        let config = Config(Box::new(MarketplaceConfig {
            base: BaseConfig {
                server_port: 5000,
                cors_origins: vec!["https://rentnest.example".to_string()],
                environment: "production".to_string(),
            },
            ..Default::default()
        }));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_production_rejects_wildcard_cors() {
        let config = Config(Box::new(MarketplaceConfig {
            base: BaseConfig {
                server_port: 5000,
                cors_origins: vec!["*".to_string()],
                environment: "production".to_string(),
            },
            store_backend: StoreBackend::Remote,
            supabase_url: Some("https://project.supabase.co".to_string()),
            supabase_service_key: Some("key".to_string()),
            ..Default::default()
        }));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("CORS"));
    }
}
