//! Route configuration and setup

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use gestio_core::config::{AppConfig, StoreBackend};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::AuthState;

/// Setup all application routes
pub fn setup_routes(config: &AppConfig, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = setup_auth_middleware(&state);

    // Public routes (no authentication required)
    let public_routes = public_routes(state.clone());

    // Protected routes (require a tenant bearer token)
    // State is applied inside protected_routes()
    let protected_routes =
        protected_routes(state.clone()).layer(axum::middleware::from_fn_with_state(
            Arc::new(auth_state),
            crate::auth::middleware::auth_middleware,
        ));

    // Merge routes and apply middleware
    let app_state_routes = public_routes.merge(protected_routes);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = app_state_routes
        .merge(utoipa_rapidoc::RapiDoc::new("/api-doc/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &AppConfig) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Setup authentication middleware state
fn setup_auth_middleware(state: &Arc<AppState>) -> AuthState {
    AuthState {
        keys: state.jwt.clone(),
    }
}

/// Public routes (no authentication required)
fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || async { health_check(state).await }
            }),
        )
        .route(
            "/live",
            get({
                let state = state.clone();
                move || async { liveness_check(state).await }
            }),
        )
        .route(
            "/ready",
            get({
                let state = state.clone();
                move || async { readiness_check(state).await }
            }),
        )
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .with_state(state)
        .route(
            "/api-doc/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// Protected routes (require authentication).
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/auth/session", API_PREFIX),
            get(handlers::auth::session),
        )
        .merge(employee_routes(state.clone()))
        .merge(client_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .with_state(state)
}

/// Employee routes
fn employee_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/employees", API_PREFIX),
            get(handlers::employees::list_employees),
        )
        .route(
            &format!("{}/employees", API_PREFIX),
            post(handlers::employees::create_employee),
        )
        .route(
            &format!("{}/employees/{{id}}", API_PREFIX),
            get(handlers::employees::get_employee),
        )
        .route(
            &format!("{}/employees/{{id}}", API_PREFIX),
            put(handlers::employees::update_employee),
        )
        .route(
            &format!("{}/employees/{{id}}", API_PREFIX),
            delete(handlers::employees::delete_employee),
        )
        .with_state(state)
}

/// Client routes
fn client_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/clients", API_PREFIX),
            get(handlers::clients::list_clients),
        )
        .route(
            &format!("{}/clients", API_PREFIX),
            post(handlers::clients::create_client),
        )
        .route(
            &format!("{}/clients/{{id}}", API_PREFIX),
            get(handlers::clients::get_client),
        )
        .route(
            &format!("{}/clients/{{id}}", API_PREFIX),
            put(handlers::clients::update_client),
        )
        .route(
            &format!("{}/clients/{{id}}", API_PREFIX),
            delete(handlers::clients::delete_client),
        )
        .with_state(state)
}

/// Appointment routes
fn appointment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/appointments", API_PREFIX),
            get(handlers::appointments::list_appointments),
        )
        .route(
            &format!("{}/appointments", API_PREFIX),
            post(handlers::appointments::create_appointment),
        )
        .route(
            &format!("{}/appointments/upcoming", API_PREFIX),
            get(handlers::appointments::upcoming_appointments),
        )
        .route(
            &format!("{}/appointments/{{id}}", API_PREFIX),
            get(handlers::appointments::get_appointment),
        )
        .route(
            &format!("{}/appointments/{{id}}", API_PREFIX),
            put(handlers::appointments::update_appointment),
        )
        .route(
            &format!("{}/appointments/{{id}}", API_PREFIX),
            delete(handlers::appointments::delete_appointment),
        )
        .with_state(state)
}

#[derive(serde::Serialize)]
struct HealthCheckResponse {
    status: String,
    store: String,
    version: String,
}

/// Liveness probe - simple check that process is running
/// Always returns 200 if process can respond
async fn liveness_check(_state: Arc<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive"
        })),
    )
}

/// Readiness probe - checks if service can accept traffic
async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    let (ready, store) = match state.config.store_backend {
        StoreBackend::Memory => (true, "ready".to_string()),
        StoreBackend::Remote => match state.config.backend_api_url.as_deref() {
            Some(_) => (true, "configured".to_string()),
            None => (false, "unconfigured".to_string()),
        },
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "store": store,
        })),
    )
}

async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    // The remote backend only answers authenticated calls, so connectivity is
    // reported from configuration rather than probed anonymously.
    let store = match state.config.store_backend {
        StoreBackend::Memory => "memory: healthy".to_string(),
        StoreBackend::Remote => match state.config.backend_api_url.as_deref() {
            Some(url) => format!("remote: {url}"),
            None => "remote: unconfigured".to_string(),
        },
    };

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        store,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
