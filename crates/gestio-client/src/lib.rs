//! Gestio Client Library
//!
//! Shared HTTP client for the remote business backend, plus store adapters
//! that implement the persistence traits over it. The bearer token of the
//! request currently being served travels in a task-local, so every call the
//! adapters make forwards the caller's own credentials rather than a shared
//! service account.

pub mod remote;

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use gestio_core::AppError;

pub use remote::{RemoteAppointmentStore, RemoteClientStore, RemoteEmployeeStore};

tokio::task_local! {
    static REQUEST_BEARER: Option<String>;
}

/// Run `fut` with the given bearer token visible to every [`ApiClient`] call
/// made inside it. The auth middleware wraps request handling in this scope.
pub async fn with_request_bearer<F: Future>(token: Option<String>, fut: F) -> F::Output {
    REQUEST_BEARER.scope(token, fut).await
}

fn current_bearer() -> Option<String> {
    REQUEST_BEARER.try_with(Clone::clone).ok().flatten()
}

/// HTTP client for the remote backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match current_bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        self.apply_auth(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request to backend failed: {}", e)))
    }

    /// GET expecting a JSON body; any non-success status is a fault.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.client.get(self.build_url(path))).await?;
        parse_json(check_status(response).await?).await
    }

    /// GET expecting a JSON body. Upstream 404 becomes `None`.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, AppError> {
        let response = self.send(self.client.get(self.build_url(path))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(parse_json(check_status(response).await?).await?))
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .send(self.client.post(self.build_url(path)).json(body))
            .await?;
        parse_json(check_status(response).await?).await
    }

    /// PUT a JSON body. Upstream 404 becomes `None`.
    pub async fn put_optional<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, AppError> {
        let response = self
            .send(self.client.put(self.build_url(path)).json(body))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(parse_json(check_status(response).await?).await?))
    }

    /// DELETE. Upstream 404 becomes `false`, success `true`.
    pub async fn delete_existing(&self, path: &str) -> Result<bool, AppError> {
        let response = self.send(self.client.delete(self.build_url(path))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check_status(response).await?;
        Ok(true)
    }
}

async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail: String = body.chars().take(200).collect();
    match status {
        StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized(
            "Backend rejected the caller's credentials".to_string(),
        )),
        StatusCode::FORBIDDEN => Err(AppError::Forbidden(
            "Backend denied access to the record".to_string(),
        )),
        _ => Err(AppError::Upstream(format!(
            "Backend returned {}: {}",
            status, detail
        ))),
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid JSON from backend: {}", e)))
}
