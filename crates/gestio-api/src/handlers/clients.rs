//! Client management handlers
//!
//! CRUD plus text search and a status filter for pipeline views (active /
//! inactive / lead).

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
use gestio_core::models::{Client, ClientStatus, CreateClient, UpdateClient};
use gestio_core::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientListQuery {
    /// Case-insensitive match against name and email
    pub q: Option<String>,
    /// Keep only clients with this status
    pub status: Option<ClientStatus>,
}

/// List clients, optionally filtered by a search term or status
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "Clients in the caller's tenant", body = Vec<Client>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Query(query): Query<ClientListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let term = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let clients = match (term, query.status) {
        (Some(q), status) => {
            let mut found = state.stores.clients.search(ctx.tenant_id, q).await?;
            if let Some(status) = status {
                found.retain(|client| client.status == status);
            }
            found
        }
        (None, Some(status)) => {
            state
                .stores
                .clients
                .list_by_status(ctx.tenant_id, status)
                .await?
        }
        (None, None) => state.stores.clients.list(ctx.tenant_id).await?,
    };
    Ok(Json(clients))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    ValidatedJson(request): ValidatedJson<CreateClient>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let client = state.stores.clients.create(ctx.tenant_id, request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Get a client by id
#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(
        ("id" = Uuid, Path, description = "Client id")
    ),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let client = state
        .stores
        .clients
        .get(ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
    Ok(Json(client))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    params(
        ("id" = Uuid, Path, description = "Client id")
    ),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(state, ctx, request))]
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateClient>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let client = state
        .stores
        .clients
        .update(ctx.tenant_id, id, request)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
    Ok(Json(client))
}

/// Delete a client
///
/// Appointments referencing the client are kept; schedule views render a
/// placeholder for the missing name.
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(
        ("id" = Uuid, Path, description = "Client id")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "clients"
)]
#[tracing::instrument(skip(state, ctx))]
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state.stores.clients.delete(ctx.tenant_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Client not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
