//! Test doubles for the Spotify domain: a manual clock, an in-memory
//! credential store and scripted token/Web API endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::client::{ApiRequest, ApiResponse, SpotifyApi};
use super::clock::Clock;
use super::credential::{Credential, CredentialStore};
use super::error::{SpotifyResult, UpstreamError};
use super::service::SpotifyService;
use super::token::{TokenEndpoint, TokenGrant, TokenManager, TokenResponse};
use crate::core::config::SpotifyConfig;

pub(crate) fn test_spotify_config() -> SpotifyConfig {
    SpotifyConfig {
        client_id: Some("test-client".to_string()),
        client_secret: Some("test-secret".to_string()),
        ..SpotifyConfig::default()
    }
}

pub(crate) fn token_response(access: &str, refresh: Option<&str>, expires_in: i64) -> TokenResponse {
    TokenResponse {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        expires_in,
        scope: None,
    }
}

/// `{"devices": [...]}` body with the given (id, is_active) pairs.
pub(crate) fn devices_body(devices: &[(&str, bool)]) -> String {
    let devices: Vec<_> = devices
        .iter()
        .map(|(id, active)| {
            serde_json::json!({
                "id": id,
                "name": format!("Device {}", id),
                "is_active": active,
                "volume_percent": 50,
                "type": "Computer",
            })
        })
        .collect();
    serde_json::json!({ "devices": devices }).to_string()
}

/// Clock that only moves when told to.
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn advance_secs(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }

    pub(crate) fn advance_millis(&self, millis: i64) {
        *self.now.lock().unwrap() += Duration::milliseconds(millis);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub(crate) struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
    saves: AtomicUsize,
}

impl MemoryCredentialStore {
    pub(crate) fn new(credential: Option<Credential>) -> Self {
        Self {
            credential: Mutex::new(credential),
            saves: AtomicUsize::new(0),
        }
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> SpotifyResult<Option<Credential>> {
        Ok(self.credential.lock().unwrap().clone())
    }

    fn save(&self, credential: &Credential) -> SpotifyResult<()> {
        *self.credential.lock().unwrap() = Some(credential.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Token endpoint answering from a queue of canned results.
#[derive(Default)]
pub(crate) struct ScriptedTokenEndpoint {
    responses: Mutex<VecDeque<Result<TokenResponse, UpstreamError>>>,
    grants: Mutex<Vec<TokenGrant>>,
    delay: Mutex<Option<std::time::Duration>>,
}

impl ScriptedTokenEndpoint {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, response: Result<TokenResponse, UpstreamError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn set_delay(&self, delay: std::time::Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub(crate) fn calls(&self) -> usize {
        self.grants.lock().unwrap().len()
    }

    pub(crate) fn grants(&self) -> Vec<TokenGrant> {
        self.grants.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenEndpoint for ScriptedTokenEndpoint {
    async fn request_token(&self, grant: &TokenGrant) -> Result<TokenResponse, UpstreamError> {
        self.grants.lock().unwrap().push(grant.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(UpstreamError::Network("no scripted response".to_string())))
    }
}

type Handler = Box<dyn Fn(&ApiRequest) -> SpotifyResult<ApiResponse> + Send + Sync>;

/// Web API double that records requests and answers through a handler.
pub(crate) struct ScriptedApi {
    handler: Mutex<Handler>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Mutex<Option<std::time::Duration>>,
}

impl ScriptedApi {
    pub(crate) fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> SpotifyResult<ApiResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Mutex::new(Box::new(handler)),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Answers every request with the given device-list body.
    pub(crate) fn with_devices(body: String) -> Self {
        Self::new(move |_| Ok(ApiResponse::new(200, body.clone())))
    }

    pub(crate) fn respond_with<F>(&self, handler: F)
    where
        F: Fn(&ApiRequest) -> SpotifyResult<ApiResponse> + Send + Sync + 'static,
    {
        *self.handler.lock().unwrap() = Box::new(handler);
    }

    pub(crate) fn set_delay(&self, delay: std::time::Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SpotifyApi for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> SpotifyResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let handler = self.handler.lock().unwrap();
        (*handler)(&request)
    }
}

/// A fully wired [`SpotifyService`] over test doubles.
pub(crate) struct Harness {
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryCredentialStore>,
    pub endpoint: Arc<ScriptedTokenEndpoint>,
    pub api: Arc<ScriptedApi>,
    pub service: Arc<SpotifyService>,
}

impl Harness {
    fn with_credential(credential: Option<Credential>) -> Self {
        let config = test_spotify_config();
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(MemoryCredentialStore::new(credential));
        let endpoint = Arc::new(ScriptedTokenEndpoint::new());
        let api = Arc::new(ScriptedApi::with_devices(devices_body(&[])));

        let tokens = Arc::new(TokenManager::new(
            &config,
            store.clone(),
            endpoint.clone(),
            clock.clone(),
        ));
        let service = Arc::new(SpotifyService::new(&config, tokens, api.clone(), clock.clone()));

        Self {
            clock,
            store,
            endpoint,
            api,
            service,
        }
    }

    /// A service holding a credential valid for an hour.
    pub(crate) fn authorized() -> Self {
        let expires_at = ManualClock::default().now() + Duration::seconds(3600);
        Self::with_credential(Some(Credential {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
            scopes: test_spotify_config().scopes,
        }))
    }

    /// A service that has never been authorized.
    pub(crate) fn unauthenticated() -> Self {
        Self::with_credential(None)
    }
}
