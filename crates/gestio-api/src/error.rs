//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `.map_err(Into::into)`
//! so they become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gestio_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Retry after a short delay")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    /// Per-field validation failures, keyed by the offending field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a simple error response with default values
    #[allow(dead_code)]
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
            recoverable: false,
            suggested_action: None,
            errors: None,
        }
    }

    /// Create an error response with all fields
    #[allow(dead_code)]
    pub fn full(
        error: impl Into<String>,
        code: impl Into<String>,
        recoverable: bool,
        suggested_action: Option<impl Into<String>>,
    ) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
            recoverable,
            suggested_action: suggested_action.map(Into::into),
            errors: None,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from gestio-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<validator::ValidationErrors> for HttpAppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HttpAppError(AppError::Validation(errors))
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let body_text = rejection.body_text();
        let message = if body_text.contains("expected a formatted UUID")
            || body_text.contains("invalid type")
        {
            // User-friendly summary for common cases (e.g. clientId: integer instead of UUID)
            "Invalid request body: ids must be UUID strings, dates YYYY-MM-DD, times HH:MM:SS."
                .to_string()
        } else {
            format!("Invalid request body: {}", body_text)
        };
        HttpAppError(AppError::InvalidInput(message))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Field errors are part of the contract, not debug detail, so they are
        // emitted in production too.
        let field_errors = app_error
            .validation_errors()
            .and_then(|errors| serde_json::to_value(errors).ok());

        // Always hide details in production for security; in non-production, only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                errors: field_errors,
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
                errors: field_errors,
            })
        };

        (status, body).into_response()
    }
}
