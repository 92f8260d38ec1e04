//! Application state shared across handlers.
//!
//! The stores behind [`gestio_store::Stores`] are trait objects, so the same
//! state works for the in-memory and remote backends.

use gestio_core::{AppConfig, AppError};
use gestio_store::Stores;

use crate::auth::{IdentityGateway, JwtKeys};
use crate::services::ScheduleService;

pub struct AppState {
    pub config: AppConfig,
    pub stores: Stores,
    pub schedule: ScheduleService,
    pub identity: IdentityGateway,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let schedule = ScheduleService::new(stores.clone());
        let identity = IdentityGateway::new(config.identity_api_url.as_deref())?;
        let jwt = JwtKeys::from_secret(&config.jwt_secret);

        Ok(AppState {
            config,
            stores,
            schedule,
            identity,
            jwt,
        })
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
