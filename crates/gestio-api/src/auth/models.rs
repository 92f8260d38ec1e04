use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // user_id
    pub tenant_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Tenant context extracted from the JWT and stored in request extensions
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
}

impl From<JwtClaims> for TenantContext {
    fn from(claims: JwtClaims) -> Self {
        TenantContext {
            tenant_id: claims.tenant_id,
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            company_name: claims.company_name,
        }
    }
}

// Extracts the context the auth middleware placed in request extensions.
// A missing context means the route was wired outside the protected group.
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing tenant context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_TENANT_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some("Check authentication token".to_string()),
                        errors: None,
                    }),
                )
            })
    }
}
