//! Employee management handlers
//!
//! CRUD plus text search. Every operation is scoped by the tenant carried in
//! the request context; per-tenant email uniqueness is enforced here because
//! the store contract has no unique index to lean on.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::TenantContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use gestio_core::models::{CreateEmployee, Employee, UpdateEmployee};
use gestio_core::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    /// Case-insensitive match against first name, last name, and email
    pub q: Option<String>,
}

/// List employees, optionally filtered by a search term
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "Employees in the caller's tenant", body = Vec<Employee>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "employees"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let employees = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => state.stores.employees.search(ctx.tenant_id, q).await?,
        None => state.stores.employees.list(ctx.tenant_id).await?,
    };
    Ok(Json(employees))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "employees"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    ValidatedJson(request): ValidatedJson<CreateEmployee>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    if state
        .stores
        .employees
        .find_by_email(ctx.tenant_id, &request.email)
        .await?
        .is_some()
    {
        return Err(AppError::field_validation(
            "email",
            "duplicate",
            "An employee with this email already exists",
        )
        .into());
    }

    let employee = state.stores.employees.create(ctx.tenant_id, request).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get an employee by id
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee details", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "employees"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let employee = state
        .stores
        .employees
        .get(ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    Ok(Json(employee))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee id")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "employees"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateEmployee>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    if let Some(email) = request.email.as_deref() {
        if let Some(existing) = state
            .stores
            .employees
            .find_by_email(ctx.tenant_id, email)
            .await?
        {
            if existing.id != id {
                return Err(AppError::field_validation(
                    "email",
                    "duplicate",
                    "An employee with this email already exists",
                )
                .into());
            }
        }
    }

    let employee = state
        .stores
        .employees
        .update(ctx.tenant_id, id, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee id")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "employees"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state.stores.employees.delete(ctx.tenant_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Employee not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
