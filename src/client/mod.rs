// This file is part of the terraform-provider-spotinst project
//
// Copyright (C) The terraform-provider-spotinst Authors, 2026.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal Spotinst REST client

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod common;
pub mod elastigroup;
pub mod error;
pub mod mrscaler;

pub use error::ApiError;

use common::{Envelope, ErrorEnvelope};

pub const DEFAULT_ENDPOINT: &str = "https://api.spotinst.io";

/// Connection parameters of the Spotinst API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub account: Option<String>,
    pub endpoint: Option<String>,
}

/// Spotinst API client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    auth_header: String,
    account: Option<String>,
    retry_config: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10000,
            timeout_seconds: 60,
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("account", &self.inner.account)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client with default configuration
    pub fn new(credentials: &Credentials) -> Result<Self, ApiError> {
        Self::with_config(credentials, RetryConfig::default())
    }

    /// Create a new API client with custom retry configuration
    pub fn with_config(
        credentials: &Credentials,
        retry_config: RetryConfig,
    ) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(retry_config.timeout_seconds))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        let base_url = credentials
            .endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string();
        let auth_header = format!("Bearer {}", credentials.token);
        let account = credentials
            .account
            .clone()
            .filter(|account| !account.is_empty());

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                auth_header,
                account,
                retry_config,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Elastigroup operations
    pub fn elastigroup(&self) -> elastigroup::ElastigroupApi<'_> {
        elastigroup::ElastigroupApi::new(self)
    }

    /// MRScaler operations
    pub fn mrscaler(&self) -> mrscaler::MrScalerApi<'_> {
        mrscaler::MrScalerApi::new(self)
    }

    /// POST `{key: item}` to `path` and return the created item
    pub(crate) async fn create_item<T>(&self, path: &str, key: &str, item: &T) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = wrap(key, item)?;
        let items = self.execute_with_retry(Method::POST, path, Some(&body)).await?;
        first_item(items, path)
    }

    /// GET a single item
    pub(crate) async fn read_item<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let items = self.execute_with_retry(Method::GET, path, None).await?;
        first_item(items, path)
    }

    /// PUT `{key: item}` to `path` and return the updated item
    pub(crate) async fn update_item<T>(&self, path: &str, key: &str, item: &T) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = wrap(key, item)?;
        let items = self.execute_with_retry(Method::PUT, path, Some(&body)).await?;
        first_item(items, path)
    }

    /// DELETE the item at `path`
    pub(crate) async fn delete_item(&self, path: &str) -> Result<(), ApiError> {
        self.execute_with_retry::<serde_json::Value>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let backoff = std::cmp::min(
                    retry.initial_backoff_ms * (2_u64.pow(attempt - 1)),
                    retry.max_backoff_ms,
                );
                tracing::debug!(
                    "Retrying {} {} after {}ms (attempt {})",
                    method,
                    path,
                    backoff,
                    attempt
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(backoff)).await;
            }

            tracing::debug!("{} request to: {}", method, url);

            let mut request = self
                .inner
                .http_client
                .request(method.clone(), &url)
                .header(AUTHORIZATION, &self.inner.auth_header);
            if let Some(account) = &self.inner.account {
                request = request.query(&[("accountId", account)]);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let error = match request.send().await {
                Ok(response) if response.status().is_success() => {
                    return parse_success_response(response).await;
                }
                Ok(response) => handle_error_response(response, path).await,
                Err(err) => ApiError::Request(err),
            };

            let idempotent = method != Method::POST;
            if attempt >= retry.max_retries || !error.is_retryable(idempotent) {
                return Err(error);
            }
            attempt += 1;
        }
    }
}

fn wrap<T: Serialize>(key: &str, item: &T) -> Result<serde_json::Value, ApiError> {
    let item = serde_json::to_value(item)
        .map_err(|err| ApiError::Parse(format!("Failed to serialize request: {err}")))?;
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), item);
    Ok(serde_json::Value::Object(body))
}

fn first_item<T>(items: Vec<T>, path: &str) -> Result<T, ApiError> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Parse(format!("Response to {path} contains no item")))
}

/// Parse successful response
async fn parse_success_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Vec<T>, ApiError> {
    let text = response.text().await?;
    tracing::debug!("API response body: {}", text);

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Envelope<T>>(&text) {
        Ok(envelope) => Ok(envelope.response.items),
        Err(err) => {
            tracing::error!("Failed to deserialize response: {}, body: {}", err, text);
            Err(ApiError::Parse(format!("Failed to parse response: {err}")))
        }
    }
}

/// Handle error response
async fn handle_error_response(response: reqwest::Response, path: &str) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    tracing::debug!("API error {}: {}", status, text);

    let body = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|envelope| envelope.response)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
        _ => {
            let message = if !body.errors.is_empty() {
                body.errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            } else if let Some(message) = body.status.and_then(|status| status.message) {
                message
            } else if !text.is_empty() {
                text
            } else {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            };
            ApiError::Api {
                status: status.as_u16(),
                message,
                errors: body.errors,
            }
        }
    }
}
