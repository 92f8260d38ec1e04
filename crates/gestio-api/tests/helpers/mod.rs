//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs against the in-memory stores, so each test gets an
//! isolated dataset and no external services are required.
//! Run from workspace root: `cargo test -p gestio-api`.

pub mod auth;

use axum_test::TestServer;
use gestio_api::constants;
use gestio_api::setup::routes;
use gestio_api::state::AppState;
use gestio_core::config::{AppConfig, StoreBackend};
use gestio_store::Stores;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub stores: Stores,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with empty in-memory stores.
pub async fn setup_test_app() -> TestApp {
    let config = create_test_config();
    let stores = Stores::in_memory();

    let state =
        Arc::new(AppState::new(config.clone(), stores.clone()).expect("Failed to build app state"));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, stores }
}

/// Setup test app with the demo dataset loaded into the demo tenant.
pub async fn setup_seeded_app() -> TestApp {
    let app = setup_test_app().await;
    gestio_store::seed::seed_demo_data(&app.stores, chrono::Utc::now().date_naive())
        .await
        .expect("Failed to seed demo data");
    app
}

fn create_test_config() -> AppConfig {
    AppConfig {
        server_port: 4000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: auth::TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        store_backend: StoreBackend::Memory,
        backend_api_url: None,
        identity_api_url: None,
        seed_demo_data: false,
        max_body_bytes: 1024 * 1024,
    }
}
