//! Gestio Store Library
//!
//! Tenant-scoped persistence traits for the records managed by the API, plus
//! an in-memory implementation used for local development and tests. Every
//! operation takes the tenant id explicitly; a record belonging to another
//! tenant is reported the same way as a record that does not exist.

pub mod memory;
pub mod seed;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use gestio_core::models::{
    Appointment, AppointmentStatus, Client, ClientStatus, CreateAppointment, CreateClient,
    CreateEmployee, Employee, UpdateAppointment, UpdateClient, UpdateEmployee,
};
use gestio_core::AppError;

/// Trait for employee persistence operations
/// This abstracts the backing store (in-memory or remote API)
#[async_trait::async_trait]
pub trait EmployeeStore: Send + Sync {
    /// List all employees for a tenant in insertion order.
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Employee>, AppError>;

    /// Fetch a single employee. Returns `None` when the id is unknown or
    /// belongs to a different tenant.
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Employee>, AppError>;

    /// Insert a new employee, stamping id, owner, and creation time.
    async fn create(&self, tenant_id: Uuid, data: CreateEmployee) -> Result<Employee, AppError>;

    /// Apply a partial update. Returns the updated record, or `None` when the
    /// target is not visible to the tenant.
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateEmployee,
    ) -> Result<Option<Employee>, AppError>;

    /// Remove an employee. Returns whether a record was actually deleted.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Case-insensitive substring search over first name, last name, and email.
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Employee>, AppError>;

    /// Exact-match lookup by email, used for the per-tenant uniqueness check.
    async fn find_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> Result<Option<Employee>, AppError>;
}

/// Trait for client persistence operations
#[async_trait::async_trait]
pub trait ClientStore: Send + Sync {
    /// List all clients for a tenant in insertion order.
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Client>, AppError>;

    /// Fetch a single client. Returns `None` when the id is unknown or
    /// belongs to a different tenant.
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Client>, AppError>;

    /// Insert a new client, stamping id, owner, and creation time.
    async fn create(&self, tenant_id: Uuid, data: CreateClient) -> Result<Client, AppError>;

    /// Apply a partial update. Returns the updated record, or `None` when the
    /// target is not visible to the tenant.
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateClient,
    ) -> Result<Option<Client>, AppError>;

    /// Remove a client. Returns whether a record was actually deleted.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Case-insensitive substring search over name and email.
    async fn search(&self, tenant_id: Uuid, query: &str) -> Result<Vec<Client>, AppError>;

    /// List clients with the given lifecycle status, in insertion order.
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: ClientStatus,
    ) -> Result<Vec<Client>, AppError>;
}

/// Trait for appointment persistence operations
#[async_trait::async_trait]
pub trait AppointmentStore: Send + Sync {
    /// List all appointments for a tenant in insertion order.
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Appointment>, AppError>;

    /// Fetch a single appointment. Returns `None` when the id is unknown or
    /// belongs to a different tenant.
    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Appointment>, AppError>;

    /// Insert a new appointment, stamping id, owner, and creation time.
    async fn create(
        &self,
        tenant_id: Uuid,
        data: CreateAppointment,
    ) -> Result<Appointment, AppError>;

    /// Apply a partial update. Returns the updated record, or `None` when the
    /// target is not visible to the tenant.
    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateAppointment,
    ) -> Result<Option<Appointment>, AppError>;

    /// Remove an appointment. Returns whether a record was actually deleted.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// List appointments on an exact day, in insertion order.
    async fn list_by_date(
        &self,
        tenant_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppError>;

    /// List appointments with the given status, in insertion order.
    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, AppError>;

    /// Scheduled appointments on or after `today`, soonest first, capped at
    /// `limit` records.
    async fn upcoming(
        &self,
        tenant_id: Uuid,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Appointment>, AppError>;
}

/// Bundle of the per-entity stores handed to the HTTP layer.
///
/// The fields are public so alternative backends (for example the remote API
/// adapters) can be assembled field by field during setup.
#[derive(Clone)]
pub struct Stores {
    pub employees: Arc<dyn EmployeeStore>,
    pub clients: Arc<dyn ClientStore>,
    pub appointments: Arc<dyn AppointmentStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            employees: Arc::new(memory::MemoryEmployeeStore::new()),
            clients: Arc::new(memory::MemoryClientStore::new()),
            appointments: Arc::new(memory::MemoryAppointmentStore::new()),
        }
    }
}
