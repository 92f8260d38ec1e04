//! Cross-entity schedule aggregation
//!
//! Joins appointments with client and employee display names, and guards
//! appointment writes with referential checks against the same tenant.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use gestio_core::models::{
    Appointment, AppointmentFilter, AppointmentView, Client, CreateAppointment, Employee,
    UpdateAppointment,
};
use gestio_core::AppError;
use gestio_store::Stores;

#[derive(Clone)]
pub struct ScheduleService {
    stores: Stores,
}

impl ScheduleService {
    pub fn new(stores: Stores) -> Self {
        ScheduleService { stores }
    }

    /// Joined list view, most recent day first, mornings before afternoons
    /// within a day.
    #[tracing::instrument(skip(self), fields(service.operation = "list_view"))]
    pub async fn list_view(
        &self,
        tenant_id: Uuid,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentView>, AppError> {
        // Single-dimension filters go through the dedicated store queries;
        // `matches` below covers the combined case.
        let appointments_fut = match (filter.date, filter.status) {
            (Some(date), None) => self.stores.appointments.list_by_date(tenant_id, date),
            (None, Some(status)) => self.stores.appointments.list_by_status(tenant_id, status),
            _ => self.stores.appointments.list(tenant_id),
        };
        let (appointments, clients, employees) = tokio::try_join!(
            appointments_fut,
            self.stores.clients.list(tenant_id),
            self.stores.employees.list(tenant_id),
        )?;

        let mut views = join_views(
            appointments
                .into_iter()
                .filter(|appointment| filter.matches(appointment))
                .collect(),
            &clients,
            &employees,
        );
        views.sort_by(|a, b| b.date.cmp(&a.date).then(a.time.cmp(&b.time)));
        Ok(views)
    }

    /// The next `limit` scheduled appointments from today onward, soonest
    /// first. "Today" is the current UTC calendar date.
    #[tracing::instrument(skip(self), fields(service.operation = "upcoming"))]
    pub async fn upcoming(
        &self,
        tenant_id: Uuid,
        limit: usize,
    ) -> Result<Vec<AppointmentView>, AppError> {
        let today = Utc::now().date_naive();
        let (appointments, clients, employees) = tokio::try_join!(
            self.stores.appointments.upcoming(tenant_id, today, limit),
            self.stores.clients.list(tenant_id),
            self.stores.employees.list(tenant_id),
        )?;

        // The store already sorted ascending; joining preserves the order.
        Ok(join_views(appointments, &clients, &employees))
    }

    /// Create an appointment after checking both references resolve within
    /// the tenant.
    #[tracing::instrument(skip(self, data), fields(service.operation = "create"))]
    pub async fn create(
        &self,
        tenant_id: Uuid,
        data: CreateAppointment,
    ) -> Result<Appointment, AppError> {
        self.ensure_references(tenant_id, data.client_id, data.employee_id)
            .await?;
        self.stores.appointments.create(tenant_id, data).await
    }

    /// Update an appointment; when a reference changes, the effective pair
    /// (patched value or current one) must resolve within the tenant.
    #[tracing::instrument(skip(self, data), fields(service.operation = "update"))]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        data: UpdateAppointment,
    ) -> Result<Option<Appointment>, AppError> {
        if data.changes_references() {
            let Some(current) = self.stores.appointments.get(tenant_id, id).await? else {
                return Ok(None);
            };
            let client_id = data.client_id.unwrap_or(current.client_id);
            let employee_id = data.employee_id.unwrap_or(current.employee_id);
            self.ensure_references(tenant_id, client_id, employee_id)
                .await?;
        }

        self.stores.appointments.update(tenant_id, id, data).await
    }

    async fn ensure_references(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), AppError> {
        let (client, employee) = tokio::try_join!(
            self.stores.clients.get(tenant_id, client_id),
            self.stores.employees.get(tenant_id, employee_id),
        )?;

        if client.is_none() {
            return Err(AppError::field_validation(
                "clientId",
                "unknown_reference",
                "Client does not exist",
            ));
        }
        if employee.is_none() {
            return Err(AppError::field_validation(
                "employeeId",
                "unknown_reference",
                "Employee does not exist",
            ));
        }
        Ok(())
    }
}

fn join_views(
    appointments: Vec<Appointment>,
    clients: &[Client],
    employees: &[Employee],
) -> Vec<AppointmentView> {
    let clients_by_id: HashMap<Uuid, &Client> =
        clients.iter().map(|client| (client.id, client)).collect();
    let employees_by_id: HashMap<Uuid, &Employee> = employees
        .iter()
        .map(|employee| (employee.id, employee))
        .collect();

    appointments
        .into_iter()
        .map(|appointment| {
            let client = clients_by_id.get(&appointment.client_id).copied();
            let employee = employees_by_id.get(&appointment.employee_id).copied();
            AppointmentView::resolve(appointment, client, employee)
        })
        .collect()
}
