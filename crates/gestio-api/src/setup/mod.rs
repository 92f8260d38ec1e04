//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod stores;

use crate::state::AppState;
use anyhow::{Context, Result};
use chrono::Utc;
use gestio_core::config::{AppConfig, StoreBackend};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: AppConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup stores
    let stores = stores::setup_stores(&config)?;

    // Demo data only makes sense for the in-memory backend; the remote
    // backend owns its own records.
    if config.seed_demo_data && config.store_backend == StoreBackend::Memory {
        gestio_store::seed::seed_demo_data(&stores, Utc::now().date_naive()).await?;
    }

    // Initialize application state
    let state = Arc::new(AppState::new(config.clone(), stores)?);

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
