//! HTTP gateway to the Elimu Online backend.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AuthStore;
use crate::cancel::CancellationToken;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("elimu-online/", env!("CARGO_PKG_VERSION"));

/// Whether a request carries the bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Never attach a token.
    #[default]
    Anonymous,
    /// Attach the token when one is stored.
    Optional,
    /// Fail with [`ApiError::NotAuthenticated`] when no token is stored.
    Required,
}

/// Per-request options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<Value>,
    auth: AuthMode,
}

impl RequestOptions {
    /// A `GET` request.
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            auth: AuthMode::Anonymous,
        }
    }

    /// A `POST` request with a JSON body.
    #[must_use]
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            auth: AuthMode::Anonymous,
        }
    }

    /// Set how the bearer token is attached.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// Backend client.
///
/// Performs no caching and no retries. Every failure is returned to the
/// caller as an [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    auth: Arc<dyn AuthStore>,
}

impl ApiClient {
    /// Create a client for `config`, reading tokens from `auth`.
    pub fn new(config: ApiConfig, auth: Arc<dyn AuthStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, config, auth })
    }

    /// Backend configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Injected auth store.
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthStore> {
        &self.auth
    }

    /// Send a request and decode the JSON response.
    ///
    /// Resolves to `None` for `204 No Content` and for empty 2xx bodies.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        self.request_cancellable(path, options, &CancellationToken::never())
            .await
    }

    /// Like [`request`](Self::request), abandoning the request when `cancel` fires.
    pub async fn request_cancellable(
        &self,
        path: &str,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("Request to {} cancelled", path);
                Err(ApiError::Cancelled)
            }
            result = self.send(path, options) => result,
        }
    }

    /// Send a request and deserialize a required JSON body into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<T> {
        match self.request_cancellable(path, options, cancel).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(ApiError::Decode(format!("empty response from {path}"))),
        }
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        let url = self.config.url(path);
        tracing::debug!("{} {}", options.method, url);

        let mut builder = self.http.request(options.method.clone(), &url);

        match (options.auth, self.auth.get_token()) {
            (AuthMode::Anonymous, _) | (AuthMode::Optional, None) => {}
            (AuthMode::Optional | AuthMode::Required, Some(token)) => {
                builder = builder.bearer_auth(token);
            }
            (AuthMode::Required, None) => return Err(ApiError::NotAuthenticated),
        }

        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            ApiError::from(e)
        })?;

        handle_response(&url, response).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("signed_in", &self.auth.get_token().is_some())
            .finish_non_exhaustive()
    }
}

/// Classify the HTTP response and decode its body.
async fn handle_response(url: &str, response: reqwest::Response) -> Result<Option<Value>> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        tracing::debug!("{} returned 204 No Content", url);
        return Ok(None);
    }

    let body = response.text().await.map_err(ApiError::from)?;

    if !status.is_success() {
        let err = ApiError::from_response(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        );
        tracing::error!("API error from {}: {}", url, err);
        return Err(err);
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&body)?;
    tracing::debug!("Fetched {} ({} bytes)", url, body.len());
    Ok(Some(value))
}
