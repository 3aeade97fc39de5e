//! HTTP client for the Pushbullet REST API.
//!
//! Only two calls are needed: listing the account's devices and pushing a
//! note to one of them. Configuration comes from the caller:
//! - `PUSHBULLET_TOKEN` - access token, sent as a bearer token
//! - `PUSHBULLET_URL` - base URL (default: `https://api.pushbullet.com/v2`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ApiError, ApiErrorResponse, Device, DevicesResponse, PushNote};

/// Default Pushbullet API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.pushbullet.com/v2";

/// Pushbullet client errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request with a structured error.
    #[error(transparent)]
    Api(ApiError),

    #[error("Server error: {0}: {1}")]
    Server(StatusCode, String),

    #[error("No devices registered on the Pushbullet account")]
    NoDevices,
}

impl NotifyError {
    /// The upstream structured error, when the API returned one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PushbulletClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl PushbulletClient {
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Build an authenticated request.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.endpoint, path);
        self.client.request(method, &url).bearer_auth(&self.token)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NotifyError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Like `handle_response`, for calls whose success body we don't need.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), NotifyError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> NotifyError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => NotifyError::Api(parsed.error),
            Err(_) => NotifyError::Server(status, body),
        }
    }

    /// List the devices registered on the account, in the order the API returns them.
    pub async fn list_devices(&self) -> Result<Vec<Device>, NotifyError> {
        let response = self
            .request(reqwest::Method::GET, "/devices")
            .send()
            .await?;
        let devices: DevicesResponse = self.handle_response(response).await?;
        Ok(devices.devices)
    }

    /// Push a plain-text note to one device.
    pub async fn push_note(
        &self,
        device_iden: &str,
        title: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        let response = self
            .request(reqwest::Method::POST, "/pushes")
            .json(&PushNote::new(device_iden, title, body))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Send a note to the first device on the account.
    ///
    /// Which device comes first is up to Pushbullet; there is no way to pick
    /// another one.
    pub async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let devices = self.list_devices().await?;
        let device = devices.first().ok_or(NotifyError::NoDevices)?;
        tracing::debug!("Pushing note to device {}", device.iden);
        self.push_note(&device.iden, title, body).await
    }
}
