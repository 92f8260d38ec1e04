//! OpenAPI documentation.
//! All endpoints are versioned under `crate::constants::API_PREFIX`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use gestio_core::models;

/// Returns the OpenAPI spec served at /api-doc/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gestio API",
        version = "0.1.0",
        description = "Management backend for small service businesses: employees, clients, and appointment scheduling. Every record is scoped to the authenticated tenant. All endpoints are versioned under /api/v1/."
    ),
    paths(
        // Auth
        handlers::auth::login,
        handlers::auth::session,
        // Employees
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,
        // Clients
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,
        // Appointments
        handlers::appointments::list_appointments,
        handlers::appointments::upcoming_appointments,
        handlers::appointments::create_appointment,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,
    ),
    components(schemas(
        models::Employee,
        models::CreateEmployee,
        models::UpdateEmployee,
        models::Client,
        models::ClientStatus,
        models::CreateClient,
        models::UpdateClient,
        models::Appointment,
        models::AppointmentStatus,
        models::CreateAppointment,
        models::UpdateAppointment,
        models::AppointmentView,
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
        handlers::auth::SessionResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Login and session inspection"),
        (name = "employees", description = "Employee management"),
        (name = "clients", description = "Client management"),
        (name = "appointments", description = "Appointment scheduling and the joined schedule view"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_versioned_paths() {
        let spec = get_openapi_spec();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        assert!(paths.iter().all(|p| p.starts_with("/api/v1/")));
        assert!(spec.paths.paths.contains_key("/api/v1/employees"));
        assert!(spec.paths.paths.contains_key("/api/v1/appointments/upcoming"));
        assert!(spec.paths.paths.contains_key("/api/v1/auth/login"));
    }
}
