use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use gestio_core::models::{Appointment, AppointmentStatus, CreateAppointment, UpdateAppointment};
use gestio_core::AppError;

use crate::AppointmentStore;

/// In-memory appointment store
#[derive(Clone, Default)]
pub struct MemoryAppointmentStore {
    records: Arc<RwLock<Vec<Appointment>>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Appointment>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| a.company_id == tenant_id)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Appointment>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|a| a.id == id && a.company_id == tenant_id)
            .cloned())
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "appointments", store.operation = "create"))]
    async fn create(
        &self,
        tenant_id: Uuid,
        data: CreateAppointment,
    ) -> Result<Appointment, AppError> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id: data.client_id,
            employee_id: data.employee_id,
            date: data.date,
            time: data.time,
            notes: data.notes,
            status: data.status,
            company_id: tenant_id,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.push(appointment.clone());
        Ok(appointment)
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "appointments", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateAppointment,
    ) -> Result<Option<Appointment>, AppError> {
        let mut records = self.records.write().await;
        let Some(appointment) = records
            .iter_mut()
            .find(|a| a.id == id && a.company_id == tenant_id)
        else {
            return Ok(None);
        };

        appointment.apply_update(data);
        Ok(Some(appointment.clone()))
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|a| !(a.id == id && a.company_id == tenant_id));
        Ok(records.len() < before)
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list_by_date"))]
    async fn list_by_date(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| a.company_id == tenant_id && a.date == date)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list_by_status"))]
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|a| a.company_id == tenant_id && a.status == status)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "upcoming"))]
    async fn upcoming(
        &self,
        tenant_id: Uuid,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Appointment>, AppError> {
        let records = self.records.read().await;
        let mut upcoming: Vec<Appointment> = records
            .iter()
            .filter(|a| {
                a.company_id == tenant_id
                    && a.status == AppointmentStatus::Scheduled
                    && a.date >= today
            })
            .cloned()
            .collect();

        upcoming.sort_by_key(Appointment::chronological_key);
        upcoming.truncate(limit);
        Ok(upcoming)
    }
}
