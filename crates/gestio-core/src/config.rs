//! Configuration module
//!
//! This module provides the application configuration, loaded from environment
//! variables (with `.env` support) and validated before the server starts.

use std::env;

// Common defaults
const DEFAULT_PORT: u16 = 4000;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Which store implementation backs the entity stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process stores, non-durable. The default.
    Memory,
    /// Proxy every operation to a remote management backend over HTTP.
    Remote,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub store_backend: StoreBackend,
    /// Base URL of the remote management backend (required for `Remote`).
    pub backend_api_url: Option<String>,
    /// Base URL of the identity provider that verifies login credentials.
    pub identity_api_url: Option<String>,
    /// Load the demo dataset into the in-memory stores at startup.
    pub seed_demo_data: bool,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let is_production = environment.to_lowercase() == "production"
            || environment.to_lowercase() == "prod";

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "remote" => StoreBackend::Remote,
            other => {
                return Err(anyhow::anyhow!(
                    "STORE_BACKEND must be 'memory' or 'remote', got '{}'",
                    other
                ))
            }
        };

        // Demo data is a development convenience and never ships to production.
        let seed_demo_data = !is_production
            && env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true);

        let config = AppConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            store_backend,
            backend_api_url: env::var("BACKEND_API_URL").ok().filter(|s| !s.is_empty()),
            identity_api_url: env::var("IDENTITY_API_URL").ok().filter(|s| !s.is_empty()),
            seed_demo_data,
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| MAX_BODY_BYTES.to_string())
                .parse()
                .unwrap_or(MAX_BODY_BYTES),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.store_backend == StoreBackend::Remote && self.backend_api_url.is_none() {
            return Err(anyhow::anyhow!(
                "BACKEND_API_URL must be set when STORE_BACKEND=remote"
            ));
        }

        Ok(())
    }
}
