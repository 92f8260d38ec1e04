//! Store backend selection

use std::sync::Arc;

use gestio_client::{ApiClient, RemoteAppointmentStore, RemoteClientStore, RemoteEmployeeStore};
use gestio_core::config::{AppConfig, StoreBackend};
use gestio_store::Stores;

/// Build the store set for the configured backend.
pub fn setup_stores(config: &AppConfig) -> Result<Stores, anyhow::Error> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory stores");
            Ok(Stores::in_memory())
        }
        StoreBackend::Remote => {
            let base_url = config.backend_api_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("BACKEND_API_URL must be set when STORE_BACKEND=remote")
            })?;
            tracing::info!(backend_api_url = %base_url, "Proxying stores to remote backend");

            let api = ApiClient::new(base_url)?;
            Ok(Stores {
                employees: Arc::new(RemoteEmployeeStore::new(api.clone())),
                clients: Arc::new(RemoteClientStore::new(api.clone())),
                appointments: Arc::new(RemoteAppointmentStore::new(api)),
            })
        }
    }
}
