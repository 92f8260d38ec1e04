//! Store adapters backed by the remote business backend.
//!
//! Each adapter forwards the caller's bearer token (see
//! [`with_request_bearer`](crate::with_request_bearer)) and enforces the
//! tenant contract on the way back: a record whose `companyId` does not match
//! the caller's tenant is logged and hidden, indistinguishable from a record
//! that does not exist. Collections are re-filtered for the same reason; the
//! backend has been observed to return unscoped lists.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use gestio_core::models::{
    Appointment, AppointmentStatus, Client, ClientStatus, CreateAppointment, CreateClient,
    CreateEmployee, Employee, UpdateAppointment, UpdateClient, UpdateEmployee,
};
use gestio_core::AppError;
use gestio_store::{AppointmentStore, ClientStore, EmployeeStore};

use crate::ApiClient;

/// Records that carry their owning tenant on the wire.
trait OwnedRecord {
    fn owner(&self) -> Uuid;
}

impl OwnedRecord for Employee {
    fn owner(&self) -> Uuid {
        self.company_id
    }
}

impl OwnedRecord for Client {
    fn owner(&self) -> Uuid {
        self.company_id
    }
}

impl OwnedRecord for Appointment {
    fn owner(&self) -> Uuid {
        self.company_id
    }
}

fn collection_path(collection: &str) -> String {
    format!("/{}", collection)
}

fn item_path(collection: &str, id: Uuid) -> String {
    format!("/{}/{}", collection, id)
}

fn keep_if_owned_by<T: OwnedRecord>(
    tenant_id: Uuid,
    collection: &'static str,
    record: T,
) -> Option<T> {
    if record.owner() == tenant_id {
        Some(record)
    } else {
        tracing::warn!(
            collection,
            tenant_id = %tenant_id,
            record_tenant_id = %record.owner(),
            "Backend returned a record belonging to another tenant; hiding it"
        );
        None
    }
}

fn retain_owned_by<T: OwnedRecord>(
    tenant_id: Uuid,
    collection: &'static str,
    records: Vec<T>,
) -> Vec<T> {
    let total = records.len();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|r| r.owner() == tenant_id)
        .collect();
    if kept.len() < total {
        tracing::warn!(
            collection,
            tenant_id = %tenant_id,
            dropped = total - kept.len(),
            "Backend returned records outside the caller's tenant; dropped them"
        );
    }
    kept
}

async fn fetch_collection<T>(
    api: &ApiClient,
    collection: &'static str,
    tenant_id: Uuid,
) -> Result<Vec<T>, AppError>
where
    T: OwnedRecord + DeserializeOwned,
{
    match api.get_json::<Vec<T>>(&collection_path(collection)).await {
        Ok(records) => Ok(retain_owned_by(tenant_id, collection, records)),
        // A denied collection read is an integration problem, not something
        // the caller can act on.
        Err(AppError::Forbidden(_)) => Err(AppError::Upstream(format!(
            "Backend denied access to the {} collection",
            collection
        ))),
        Err(e) => Err(e),
    }
}

async fn fetch_item<T>(
    api: &ApiClient,
    collection: &'static str,
    tenant_id: Uuid,
    id: Uuid,
) -> Result<Option<T>, AppError>
where
    T: OwnedRecord + DeserializeOwned,
{
    match api.get_optional::<T>(&item_path(collection, id)).await {
        Ok(record) => Ok(record.and_then(|r| keep_if_owned_by(tenant_id, collection, r))),
        Err(AppError::Forbidden(_)) => {
            tracing::warn!(collection, tenant_id = %tenant_id, record_id = %id, "Backend refused the record read; treating as not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

async fn create_item<T, B>(
    api: &ApiClient,
    collection: &'static str,
    tenant_id: Uuid,
    body: &B,
) -> Result<T, AppError>
where
    T: OwnedRecord + DeserializeOwned,
    B: Serialize,
{
    let record: T = api.post_json(&collection_path(collection), body).await?;
    if record.owner() != tenant_id {
        tracing::error!(
            collection,
            tenant_id = %tenant_id,
            record_tenant_id = %record.owner(),
            "Backend created a record under a different tenant"
        );
        return Err(AppError::Upstream(format!(
            "Backend stored the new {} record under the wrong tenant",
            collection
        )));
    }
    Ok(record)
}

async fn update_item<T, B>(
    api: &ApiClient,
    collection: &'static str,
    tenant_id: Uuid,
    id: Uuid,
    body: &B,
) -> Result<Option<T>, AppError>
where
    T: OwnedRecord + DeserializeOwned,
    B: Serialize,
{
    match api.put_optional::<T, B>(&item_path(collection, id), body).await {
        Ok(record) => Ok(record.and_then(|r| keep_if_owned_by(tenant_id, collection, r))),
        Err(AppError::Forbidden(_)) => {
            tracing::warn!(collection, tenant_id = %tenant_id, record_id = %id, "Backend refused the record update; treating as not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

async fn delete_item(
    api: &ApiClient,
    collection: &'static str,
    tenant_id: Uuid,
    id: Uuid,
) -> Result<bool, AppError> {
    match api.delete_existing(&item_path(collection, id)).await {
        Ok(deleted) => Ok(deleted),
        Err(AppError::Forbidden(_)) => {
            tracing::warn!(collection, tenant_id = %tenant_id, record_id = %id, "Backend refused the record delete; treating as not found");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Employee store served by the remote backend.
#[derive(Clone)]
pub struct RemoteEmployeeStore {
    api: ApiClient,
}

impl RemoteEmployeeStore {
    const COLLECTION: &'static str = "employees";

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl EmployeeStore for RemoteEmployeeStore {
    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Employee>, AppError> {
        fetch_collection(&self.api, Self::COLLECTION, tenant_id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Employee>, AppError> {
        fetch_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "employees", store.operation = "create"))]
    async fn create(&self, tenant_id: Uuid, data: CreateEmployee) -> Result<Employee, AppError> {
        create_item(&self.api, Self::COLLECTION, tenant_id, &data).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "employees", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateEmployee,
    ) -> Result<Option<Employee>, AppError> {
        update_item(&self.api, Self::COLLECTION, tenant_id, id, &data).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        delete_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "search"))]
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Employee>, AppError> {
        // The backend only exposes the plain collection; match locally.
        let needle = query.to_lowercase();
        let records = fetch_collection::<Employee>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records
            .into_iter()
            .filter(|e| {
                e.first_name.to_lowercase().contains(&needle)
                    || e.last_name.to_lowercase().contains(&needle)
                    || e.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "employees", store.operation = "find_by_email"))]
    async fn find_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<Employee>, AppError> {
        let records = fetch_collection::<Employee>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records
            .into_iter()
            .find(|e| e.email.eq_ignore_ascii_case(email)))
    }
}

/// Client store served by the remote backend.
#[derive(Clone)]
pub struct RemoteClientStore {
    api: ApiClient,
}

impl RemoteClientStore {
    const COLLECTION: &'static str = "clients";

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl ClientStore for RemoteClientStore {
    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Client>, AppError> {
        fetch_collection(&self.api, Self::COLLECTION, tenant_id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError> {
        fetch_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "clients", store.operation = "create"))]
    async fn create(&self, tenant_id: Uuid, data: CreateClient) -> Result<Client, AppError> {
        create_item(&self.api, Self::COLLECTION, tenant_id, &data).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "clients", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateClient,
    ) -> Result<Option<Client>, AppError> {
        update_item(&self.api, Self::COLLECTION, tenant_id, id, &data).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        delete_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "search"))]
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Client>, AppError> {
        let needle = query.to_lowercase();
        let records = fetch_collection::<Client>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "clients", store.operation = "list_by_status"))]
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: ClientStatus,
    ) -> Result<Vec<Client>, AppError> {
        let records = fetch_collection::<Client>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records.into_iter().filter(|c| c.status == status).collect())
    }
}

/// Appointment store served by the remote backend.
#[derive(Clone)]
pub struct RemoteAppointmentStore {
    api: ApiClient,
}

impl RemoteAppointmentStore {
    const COLLECTION: &'static str = "appointments";

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl AppointmentStore for RemoteAppointmentStore {
    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list"))]
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Appointment>, AppError> {
        fetch_collection(&self.api, Self::COLLECTION, tenant_id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "get", store.record_id = %id))]
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Appointment>, AppError> {
        fetch_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "appointments", store.operation = "create"))]
    async fn create(
        &self,
        tenant_id: Uuid,
        data: CreateAppointment,
    ) -> Result<Appointment, AppError> {
        create_item(&self.api, Self::COLLECTION, tenant_id, &data).await
    }

    #[tracing::instrument(skip(self, data), fields(store.collection = "appointments", store.operation = "update", store.record_id = %id))]
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateAppointment,
    ) -> Result<Option<Appointment>, AppError> {
        update_item(&self.api, Self::COLLECTION, tenant_id, id, &data).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "delete", store.record_id = %id))]
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        delete_item(&self.api, Self::COLLECTION, tenant_id, id).await
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list_by_date"))]
    async fn list_by_date(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError> {
        let records =
            fetch_collection::<Appointment>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records.into_iter().filter(|a| a.date == date).collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "list_by_status"))]
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppError> {
        let records =
            fetch_collection::<Appointment>(&self.api, Self::COLLECTION, tenant_id).await?;
        Ok(records.into_iter().filter(|a| a.status == status).collect())
    }

    #[tracing::instrument(skip(self), fields(store.collection = "appointments", store.operation = "upcoming"))]
    async fn upcoming(
        &self,
        tenant_id: Uuid,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Appointment>, AppError> {
        let records =
            fetch_collection::<Appointment>(&self.api, Self::COLLECTION, tenant_id).await?;
        let mut upcoming: Vec<Appointment> = records
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled && a.date >= today)
            .collect();
        upcoming.sort_by_key(Appointment::chronological_key);
        upcoming.truncate(limit);
        Ok(upcoming)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn employee_for(tenant_id: Uuid) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            first_name: "Luca".to_string(),
            last_name: "Bianchi".to_string(),
            email: "luca.bianchi@azienda.it".to_string(),
            phone: None,
            role: "Tecnico".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
            company_id: tenant_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_path_includes_collection_and_id() {
        let id = Uuid::new_v4();
        assert_eq!(item_path("employees", id), format!("/employees/{}", id));
        assert_eq!(collection_path("clients"), "/clients");
    }

    #[test]
    fn test_records_from_other_tenants_are_hidden() {
        let tenant = Uuid::new_v4();
        let mine = employee_for(tenant);
        let foreign = employee_for(Uuid::new_v4());

        assert!(keep_if_owned_by(tenant, "employees", mine.clone()).is_some());
        assert!(keep_if_owned_by(tenant, "employees", foreign.clone()).is_none());

        let filtered = retain_owned_by(tenant, "employees", vec![mine, foreign]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].company_id, tenant);
    }
}
