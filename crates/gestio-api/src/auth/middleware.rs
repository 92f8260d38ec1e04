use crate::auth::jwt::JwtKeys;
use crate::auth::models::TenantContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gestio_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub keys: JwtKeys,
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    if !auth_header.starts_with("Bearer ") {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    }

    let token = auth_header[7..].to_string(); // Remove "Bearer " prefix

    let claims = match auth_state.keys.verify(&token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError(err).into_response(),
    };

    let tenant_context = TenantContext::from(claims);
    tracing::debug!(
        tenant_id = %tenant_context.tenant_id,
        user_id = %tenant_context.user_id,
        "Authenticated request"
    );
    request.extensions_mut().insert(tenant_context);

    // Remote stores forward the caller's own credentials, so the bearer is
    // scoped to this request's handler future.
    gestio_client::with_request_bearer(Some(token), next.run(request)).await
}
