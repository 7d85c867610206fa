//! HTTP client for the Kathalu corpus API.
//!
//! Provides a minimal client with configurable auth (Bearer token or X-API-Key),
//! generic GET/POST helpers, and domain methods (login, categories, chunked upload,
//! contributions). The client also implements [`kathalu_core::Transport`] so the
//! upload pipeline can drive it directly.

pub mod api;
mod transport;

use std::time::Duration;

use anyhow::{Context, Result};
use kathalu_core::{ClientConfig, TransportError, TransportResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// HTTP client for the Kathalu API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    prefix: String,
    auth: Option<Auth>,
}

impl ApiClient {
    /// `prefix` is the versioned API path, e.g. `/api/v1`. Without `auth` only
    /// unauthenticated endpoints such as login will succeed.
    pub fn new(
        base_url: &str,
        prefix: &str,
        auth: Option<Auth>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: format!("/{}", prefix.trim_matches('/')),
            auth,
        })
    }

    /// Create a client from loaded configuration. A bearer token takes precedence
    /// over the service API key.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let auth = config
            .api_token
            .clone()
            .map(Auth::Bearer)
            .or_else(|| config.api_key.clone().map(Auth::XApiKey));

        Self::new(
            &config.api_base_url,
            &config.api_prefix(),
            auth,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Full URL for a path below the API prefix.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(Auth::Bearer(token)) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> TransportResult<Response> {
        let request = self
            .apply_auth(request)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(method = %method, url = %url, "Sending API request");

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "API request failed");
            TransportError::Request(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "API request returned an error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "API request succeeded"
        );
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> TransportResult<T> {
        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        let response = self.send(self.client.get(self.build_url(path))).await?;
        Self::decode(response).await
    }

    /// GET request where 404 means "nothing here" rather than an error.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> TransportResult<Option<T>> {
        match self.get(path).await {
            Ok(body) => Ok(Some(body)),
            Err(TransportError::Status { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> TransportResult<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// POST url-encoded form. The response body is discarded.
    pub async fn post_form<B: serde::Serialize>(&self, path: &str, body: &B) -> TransportResult<()> {
        let request = self.client.post(self.build_url(path)).form(body);
        self.send(request).await.map(|_| ())
    }

    /// POST multipart form. The response body is discarded.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> TransportResult<()> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        self.send(request).await.map(|_| ())
    }
}
