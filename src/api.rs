//! Thin JSON client for the task backend.
//!
//! Every response body is decoded as JSON before the status is looked at, so
//! error responses surface the backend's `error` message. Failures are logged
//! and handed back to the caller unchanged; nothing is retried.

use crate::config::resolve_api_base_url;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::error;

const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Uses `API_BASE_URL`, falling back to the local backend.
    pub fn from_env() -> Self {
        Self::new(resolve_api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch_data(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.fetch_data(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.fetch_data(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch_data(Method::DELETE, path, None::<&()>).await
    }

    /// Sends one request to `base_url + path` and decodes the JSON reply.
    pub async fn fetch_data<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let result = self.send(method, path, body).await;
        if let Err(err) = &result {
            error!("API call error: {err}");
        }
        result
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&data),
            });
        }

        Ok(serde_json::from_value(data)?)
    }
}

/// The backend's `error` field, read the way a truthiness check would:
/// missing, null, `false`, `0` and `""` all fall back to a generic message.
fn error_message(data: &Value) -> String {
    match data.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => FALLBACK_MESSAGE.to_string(),
        Some(Value::String(message)) if message.is_empty() => FALLBACK_MESSAGE.to_string(),
        Some(Value::String(message)) => message.clone(),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            FALLBACK_MESSAGE.to_string()
        }
        Some(other) => other.to_string(),
    }
}
