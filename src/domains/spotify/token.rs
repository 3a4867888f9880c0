//! OAuth token lifecycle: acquire, cache, detect staleness, refresh, persist.
//!
//! [`TokenManager`] owns the in-memory credential. Token reads and refreshes
//! go through one async mutex, so when several tool calls notice a stale token
//! at the same time only the first one talks to the token endpoint and the
//! others pick up its result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::clock::Clock;
use super::credential::{Credential, CredentialStore, expiry_after, parse_scopes};
use super::error::{SpotifyError, SpotifyResult, UpstreamError};
use crate::core::config::SpotifyConfig;

/// A grant sent to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    AuthorizationCode { code: String, redirect_uri: String },
    RefreshToken { refresh_token: String },
}

impl TokenGrant {
    /// Form fields for the `application/x-www-form-urlencoded` body.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::AuthorizationCode { code, redirect_uri } => vec![
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
            ],
            Self::RefreshToken { refresh_token } => vec![
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ],
        }
    }
}

/// Fields consumed from a token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds, relative to the time of the response.
    pub expires_in: i64,

    #[serde(default)]
    pub scope: Option<String>,
}

/// The OAuth token endpoint.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn request_token(&self, grant: &TokenGrant) -> Result<TokenResponse, UpstreamError>;
}

/// Read-only view of the authorization state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuthStatus {
    Unauthenticated,
    Authorized {
        scopes: Vec<String>,
        #[serde(with = "chrono::serde::ts_seconds")]
        expires_at: DateTime<Utc>,
    },
}

impl AuthStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }
}

/// Owns the credential and keeps it valid.
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    endpoint: Arc<dyn TokenEndpoint>,
    clock: Arc<dyn Clock>,
    redirect_uri: String,
    requested_scopes: Vec<String>,
    state: Mutex<Option<Credential>>,
}

impl TokenManager {
    /// Create a token manager. Nothing is read until first use.
    pub fn new(
        config: &SpotifyConfig,
        store: Arc<dyn CredentialStore>,
        endpoint: Arc<dyn TokenEndpoint>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            endpoint,
            clock,
            redirect_uri: config.redirect_uri.clone(),
            requested_scopes: config.scopes.clone(),
            state: Mutex::new(None),
        }
    }

    /// Return an access token that is valid right now, refreshing it first if
    /// it is within the staleness margin of its expiry.
    #[instrument(skip(self))]
    pub async fn get_valid_credential(&self) -> SpotifyResult<String> {
        let mut state = self.state.lock().await;

        let current = match state.as_ref() {
            Some(credential) => credential.clone(),
            None => {
                let loaded = self.store.load()?.ok_or(SpotifyError::Unauthenticated)?;
                *state = Some(loaded.clone());
                loaded
            }
        };

        let now = self.clock.now();
        if !current.is_stale(now) {
            return Ok(current.access_token);
        }

        // Another process may already have refreshed the file.
        if let Some(stored) = self.store.load()?
            && !stored.is_stale(now)
        {
            debug!("Adopting fresher credential from store");
            let token = stored.access_token.clone();
            *state = Some(stored);
            return Ok(token);
        }

        let refreshed = self.refresh(&current).await?;
        self.store.save(&refreshed)?;

        let token = refreshed.access_token.clone();
        *state = Some(refreshed);
        info!("Access token refreshed");
        Ok(token)
    }

    /// Exchange a one-time authorization code for a fresh credential and
    /// persist it.
    #[instrument(skip(self, code))]
    pub async fn complete_authorization(&self, code: &str) -> SpotifyResult<Credential> {
        let mut state = self.state.lock().await;

        let grant = TokenGrant::AuthorizationCode {
            code: code.to_string(),
            redirect_uri: self.redirect_uri.clone(),
        };
        let response = self
            .endpoint
            .request_token(&grant)
            .await
            .map_err(SpotifyError::AuthorizationExchangeFailed)?;

        if response.access_token.is_empty() {
            return Err(SpotifyError::AuthorizationExchangeFailed(
                UpstreamError::invalid_response("empty access_token"),
            ));
        }

        let expires_at = expiry_after(self.clock.now(), response.expires_in)
            .map_err(SpotifyError::AuthorizationExchangeFailed)?;

        let credential = Credential {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            scopes: response
                .scope
                .as_deref()
                .map(parse_scopes)
                .unwrap_or_else(|| self.requested_scopes.clone()),
        };

        self.store.save(&credential)?;
        *state = Some(credential.clone());

        info!("Authorization complete, credential expires at {}", credential.expires_at);
        Ok(credential)
    }

    /// Current authorization state, read from the credential store.
    ///
    /// Never refreshes and never waits on a refresh in flight; a removed
    /// credential file reads as unauthenticated.
    pub async fn status(&self) -> SpotifyResult<AuthStatus> {
        Ok(match self.store.load()? {
            Some(credential) => AuthStatus::Authorized {
                scopes: credential.scopes,
                expires_at: credential.expires_at,
            },
            None => AuthStatus::Unauthenticated,
        })
    }

    /// Snapshot of the credential as currently known, loading it from the
    /// store if nothing is held in memory yet.
    pub async fn credential(&self) -> SpotifyResult<Option<Credential>> {
        let mut state = self.state.lock().await;
        if state.is_none() {
            *state = self.store.load()?;
        }
        Ok(state.clone())
    }

    async fn refresh(&self, current: &Credential) -> SpotifyResult<Credential> {
        let Some(refresh_token) = current.refresh_token.clone() else {
            warn!("Access token is stale and no refresh token is stored");
            return Err(SpotifyError::RefreshFailed(UpstreamError::MissingRefreshToken));
        };

        debug!("Refreshing access token expiring at {}", current.expires_at);
        let response = self
            .endpoint
            .request_token(&TokenGrant::RefreshToken { refresh_token })
            .await
            .map_err(|e| {
                warn!("Token refresh failed: {}", e);
                SpotifyError::RefreshFailed(e)
            })?;

        if response.access_token.is_empty() {
            return Err(SpotifyError::RefreshFailed(UpstreamError::invalid_response(
                "empty access_token",
            )));
        }

        let expires_at =
            expiry_after(self.clock.now(), response.expires_in).map_err(SpotifyError::RefreshFailed)?;

        let mut next = current.clone();
        next.access_token = response.access_token;
        next.expires_at = expires_at;
        if let Some(rotated) = response.refresh_token.filter(|t| !t.is_empty()) {
            next.refresh_token = Some(rotated);
        }
        Ok(next)
    }
}
