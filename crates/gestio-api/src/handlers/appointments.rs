//! Appointment management handlers
//!
//! The collection endpoints return the joined schedule view (client and
//! employee names resolved); single-record endpoints return plain
//! appointment records. Writes go through the schedule service so the
//! referential check runs before the store is touched.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::TenantContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use gestio_core::constants::DEFAULT_UPCOMING_LIMIT;
use gestio_core::models::{
    Appointment, AppointmentFilter, AppointmentStatus, AppointmentView, CreateAppointment,
    UpdateAppointment,
};
use gestio_core::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AppointmentListQuery {
    /// Keep only appointments on this day (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// Keep only appointments with this status
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UpcomingQuery {
    /// Maximum number of records to return (default 5)
    pub limit: Option<usize>,
}

/// List appointments as the joined schedule view
///
/// Sorted most recent day first, then by time of day ascending.
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    params(AppointmentListQuery),
    responses(
        (status = 200, description = "Schedule view for the caller's tenant", body = Vec<AppointmentView>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filter = AppointmentFilter {
        date: query.date,
        status: query.status,
    };
    let views = state.schedule.list_view(ctx.tenant_id, filter).await?;
    Ok(Json(views))
}

/// Next scheduled appointments from today onward, soonest first
#[utoipa::path(
    get,
    path = "/api/v1/appointments/upcoming",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Upcoming appointments", body = Vec<AppointmentView>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn upcoming_appointments(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Query(query): Query<UpcomingQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    let views = state.schedule.upcoming(ctx.tenant_id, limit).await?;
    Ok(Json(views))
}

/// Create an appointment
///
/// The referenced client and employee must exist in the caller's tenant.
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = CreateAppointment,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    ValidatedJson(request): ValidatedJson<CreateAppointment>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let appointment = state.schedule.create(ctx.tenant_id, request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Get an appointment by id
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "Appointment details", body = Appointment),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let appointment = state
        .stores
        .appointments
        .get(ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    Ok(Json(appointment))
}

/// Update an appointment
#[utoipa::path(
    put,
    path = "/api/v1/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment id")
    ),
    request_body = UpdateAppointment,
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateAppointment>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let appointment = state
        .schedule
        .update(ctx.tenant_id, id, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    Ok(Json(appointment))
}

/// Delete an appointment
#[utoipa::path(
    delete,
    path = "/api/v1/appointments/{id}",
    params(
        ("id" = Uuid, Path, description = "Appointment id")
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Appointment not found", body = ErrorResponse)
    ),
    tag = "appointments"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state.stores.appointments.delete(ctx.tenant_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Appointment not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
