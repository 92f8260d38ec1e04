//! Authentication handlers
//!
//! Login proxies the credentials to the identity provider and answers with a
//! locally minted session token; the session endpoint echoes the claims of
//! the presented token.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::models::TenantContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use gestio_core::AppError;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile facts of the authenticated user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl From<TenantContext> for SessionResponse {
    fn from(ctx: TenantContext) -> Self {
        SessionResponse {
            user_id: ctx.user_id,
            tenant_id: ctx.tenant_id,
            name: ctx.name,
            email: ctx.email,
            company_name: ctx.company_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionResponse,
}

/// Log in with identity provider credentials
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 502, description = "Identity provider unavailable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, request))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let session = state
        .identity
        .login(&request.username, &request.password)
        .await?;
    let context = TenantContext {
        tenant_id: session.tenant_id,
        user_id: session.user_id,
        name: session.name,
        email: session.email,
        company_name: session.company_name,
    };
    let token = state.jwt.mint(&context, state.config.jwt_expiry_hours)?;
    tracing::info!(
        tenant_id = %context.tenant_id,
        user_id = %context.user_id,
        "Login succeeded"
    );

    Ok(Json(LoginResponse {
        token,
        user: SessionResponse::from(context),
    }))
}

/// Describe the authenticated session
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Claims of the presented token", body = SessionResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(ctx))]
pub async fn session(ctx: TenantContext) -> impl IntoResponse {
    Json(SessionResponse::from(ctx))
}
