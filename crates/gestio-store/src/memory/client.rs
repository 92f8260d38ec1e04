use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gestio_core::models::{Client, ClientStatus, CreateClient, UpdateClient};
use gestio_core::AppError;

use crate::ClientStore;

/// In-memory client store
#[derive(Clone, Default)]
pub struct MemoryClientStore {
    records: Arc<RwLock<Vec<Client>>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ClientStore for MemoryClientStore {
    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Client>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| c.company_id == tenant_id)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|c| c.id == id && c.company_id == tenant_id)
            .cloned())
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "clients", store.operation = "create"))]
    async fn create(&self, tenant_id: Uuid, data: CreateClient) -> Result<Client, AppError> {
        let client = Client {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            city: data.city,
            zip_code: data.zip_code,
            status: data.status,
            company_id: tenant_id,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.push(client.clone());
        Ok(client)
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "clients", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateClient,
    ) -> Result<Option<Client>, AppError> {
        let mut records = self.records.write().await;
        let Some(client) = records
            .iter_mut()
            .find(|c| c.id == id && c.company_id == tenant_id)
        else {
            return Ok(None);
        };

        client.apply_update(data);
        Ok(Some(client.clone()))
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|c| !(c.id == id && c.company_id == tenant_id));
        Ok(records.len() < before)
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "search"))]
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Client>, AppError> {
        let needle = query.to_lowercase();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| c.company_id == tenant_id)
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "list_by_status"))]
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: ClientStatus,
    ) -> Result<Vec<Client>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|c| c.company_id == tenant_id && c.status == status)
            .cloned()
            .collect())
    }
}
