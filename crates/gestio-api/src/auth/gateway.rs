//! Identity provider gateway
//!
//! Login credentials are never checked locally. They are forwarded to the
//! configured identity provider and a successful answer becomes a Gestio
//! session.

use gestio_core::AppError;
use serde::Deserialize;
use uuid::Uuid;

const LOGIN_TIMEOUT_SECS: u64 = 10;

/// Profile and tenant facts the identity provider reports for a valid login.
#[derive(Debug, Clone)]
pub struct UpstreamSession {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginUpstreamResponse {
    /// Proof that the provider issued a session. The value itself is not
    /// kept: Gestio mints its own token.
    access_token: String,
    #[serde(default)]
    user_id: Option<Uuid>,
    #[serde(default)]
    company_id: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Clone)]
pub struct IdentityGateway {
    client: reqwest::Client,
    login_url: Option<String>,
}

impl IdentityGateway {
    pub fn new(identity_api_url: Option<&str>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(LOGIN_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(IdentityGateway {
            client,
            login_url: identity_api_url
                .map(|base| format!("{}/auth/login", base.trim_end_matches('/'))),
        })
    }

    /// Verify credentials against the identity provider.
    ///
    /// Upstream 401/403 means the credentials are wrong; any other failure is
    /// an upstream fault and must not read as "wrong password" to the caller.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<UpstreamSession, AppError> {
        let Some(login_url) = self.login_url.as_deref() else {
            return Err(AppError::Internal(
                "IDENTITY_API_URL is not configured".to_string(),
            ));
        };

        let response = self
            .client
            .post(login_url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Identity provider unreachable: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Identity provider returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: LoginUpstreamResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Invalid JSON from identity provider: {}", e))
        })?;

        if body.access_token.is_empty() {
            return Err(AppError::Upstream(
                "Identity provider response missing access token".to_string(),
            ));
        }
        let tenant_id = body.company_id.ok_or_else(|| {
            AppError::Upstream("Identity provider response missing tenant id".to_string())
        })?;
        let user_id = body.user_id.ok_or_else(|| {
            AppError::Upstream("Identity provider response missing user id".to_string())
        })?;

        Ok(UpstreamSession {
            user_id,
            tenant_id,
            name: body.name,
            email: body.email,
            company_name: body.company_name,
        })
    }
}
