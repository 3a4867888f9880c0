//! HTTP clients for the Spotify accounts service and Web API.
//!
//! Both clients share one `reqwest::Client` configured with an overall
//! request timeout and a shorter connect timeout. A timed-out call surfaces as
//! [`UpstreamError::Network`]; nothing is retried.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::{SpotifyError, SpotifyResult, UpstreamError};
use super::token::{TokenEndpoint, TokenGrant, TokenManager, TokenResponse};
use crate::core::config::SpotifyConfig;

/// One call to the Web API, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter if the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed Web API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, UpstreamError> {
        serde_json::from_str(&self.body).map_err(|e| UpstreamError::invalid_response(e.to_string()))
    }

    /// Turn this response into a status error.
    pub fn into_error(self) -> UpstreamError {
        UpstreamError::Status {
            status: self.status,
            body: self.body,
        }
    }
}

/// Authenticated access to the Spotify Web API.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Issue one request. Any HTTP status is returned as a response; only
    /// authorization and transport failures are errors.
    async fn send(&self, request: ApiRequest) -> SpotifyResult<ApiResponse>;
}

/// Build the shared HTTP client from configuration.
pub fn build_http_client(config: &SpotifyConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

/// `base64(client_id:client_secret)` for the token endpoint's Basic auth.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret))
}

/// Client for the accounts service token endpoint.
pub struct AccountsClient {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl AccountsClient {
    pub fn new(http: reqwest::Client, config: &SpotifyConfig) -> Self {
        Self {
            http,
            token_url: format!("{}/api/token", config.accounts_base_url.trim_end_matches('/')),
            client_id: config.client_id.clone().unwrap_or_default(),
            client_secret: config.client_secret.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl TokenEndpoint for AccountsClient {
    #[instrument(skip_all)]
    async fn request_token(&self, grant: &TokenGrant) -> Result<TokenResponse, UpstreamError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                format!("Basic {}", basic_credentials(&self.client_id, &self.client_secret)),
            )
            .form(&grant.form_fields())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Token endpoint answered {}", status);

        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::invalid_response(e.to_string()))
    }
}

/// Client for the Web API. Every call carries a bearer token obtained from
/// the [`TokenManager`], refreshing it when needed.
pub struct WebApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenManager>,
}

impl WebApiClient {
    pub fn new(http: reqwest::Client, config: &SpotifyConfig, tokens: Arc<TokenManager>) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

#[async_trait]
impl SpotifyApi for WebApiClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> SpotifyResult<ApiResponse> {
        let token = self.tokens.get_valid_credential().await?;

        let mut builder = self
            .http
            .request(request.method, format!("{}{}", self.base_url, request.path))
            .bearer_auth(token);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(UpstreamError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(UpstreamError::from)?;
        debug!("Web API answered {}", status);

        Ok(ApiResponse { status, body })
    }
}

/// Build the URL the user opens to grant access.
pub fn authorize_url(config: &SpotifyConfig) -> SpotifyResult<String> {
    let client_id = config
        .client_id
        .as_deref()
        .ok_or_else(|| SpotifyError::config("SPOTIFY_CLIENT_ID is not set"))?;
    let scope = config.scopes.join(" ");
    let query = serde_urlencoded::to_string([
        ("response_type", "code"),
        ("client_id", client_id),
        ("scope", scope.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
    ])
    .map_err(|e| SpotifyError::config(e.to_string()))?;

    Ok(format!(
        "{}/authorize?{}",
        config.accounts_base_url.trim_end_matches('/'),
        query
    ))
}
