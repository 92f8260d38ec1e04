use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gestio_core::models::{CreateEmployee, Employee, UpdateEmployee};
use gestio_core::AppError;

use crate::EmployeeStore;

/// In-memory employee store
#[derive(Clone, Default)]
pub struct MemoryEmployeeStore {
    records: Arc<RwLock<Vec<Employee>>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Employee>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|e| e.company_id == tenant_id)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Employee>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|e| e.id == id && e.company_id == tenant_id)
            .cloned())
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "employees", store.operation = "create"))]
    async fn create(&self, tenant_id: Uuid, data: CreateEmployee) -> Result<Employee, AppError> {
        let employee = Employee {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            role: data.role,
            hire_date: data.hire_date,
            company_id: tenant_id,
            created_at: Utc::now(),
        };

        let mut records = self.records.write().await;
        records.push(employee.clone());
        Ok(employee)
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "employees", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateEmployee,
    ) -> Result<Option<Employee>, AppError> {
        let mut records = self.records.write().await;
        let Some(employee) = records
            .iter_mut()
            .find(|e| e.id == id && e.company_id == tenant_id)
        else {
            return Ok(None);
        };

        employee.apply_update(data);
        Ok(Some(employee.clone()))
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|e| !(e.id == id && e.company_id == tenant_id));
        Ok(records.len() < before)
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "search"))]
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Employee>, AppError> {
        let needle = query.to_lowercase();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|e| e.company_id == tenant_id)
            .filter(|e| {
                e.first_name.to_lowercase().contains(&needle)
                    || e.last_name.to_lowercase().contains(&needle)
                    || e.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "find_by_email"))]
    async fn find_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<Employee>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|e| e.company_id == tenant_id && e.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
