//! Spotify service - the entry point used by tools and resources.
//!
//! Mutating commands follow the same path: validate arguments, resolve the
//! target device (which may refill the device cache), then issue one Web API
//! call whose bearer token may trigger a refresh.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::client::{
    AccountsClient, ApiRequest, SpotifyApi, WebApiClient, authorize_url, build_http_client,
};
use super::clock::{Clock, SystemClock};
use super::credential::{Credential, FileCredentialStore};
use super::devices::{DeviceCache, DeviceRecord, device_ttl};
use super::error::{SpotifyError, SpotifyResult, UpstreamError};
use super::playback::{PlayRequest, build_play_body, classify_playback_response};
use super::player::{NowPlaying, parse_now_playing};
use super::resolver::DeviceResolver;
use super::search::{TrackSummary, parse_search_results, validate_search_limit};
use super::token::{AuthStatus, TokenManager};
use crate::core::config::SpotifyConfig;

/// Result of a successful play command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayReport {
    /// What started playing (a URI, or "current context").
    pub what: String,
    /// The device the command was sent to, if one was resolved.
    pub device_id: Option<String>,
}

/// Coordinates credentials, devices and Web API calls.
pub struct SpotifyService {
    config: SpotifyConfig,
    tokens: Arc<TokenManager>,
    api: Arc<dyn SpotifyApi>,
    devices: Arc<DeviceCache>,
    resolver: DeviceResolver,
}

impl SpotifyService {
    /// Wire the service against the real Spotify endpoints.
    pub fn from_config(config: &SpotifyConfig) -> SpotifyResult<Self> {
        let http = build_http_client(config)
            .map_err(|e| SpotifyError::config(format!("failed to build HTTP client: {}", e)))?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

        let tokens = Arc::new(TokenManager::new(
            config,
            Arc::new(FileCredentialStore::new(config.token_path.clone())),
            Arc::new(AccountsClient::new(http.clone(), config)),
            clock.clone(),
        ));
        let api = Arc::new(WebApiClient::new(http, config, tokens.clone()));

        info!(
            "Spotify service ready (tokens at {})",
            config.token_path.display()
        );
        Ok(Self::new(config, tokens, api, clock))
    }

    /// Wire the service from already-built parts.
    pub fn new(
        config: &SpotifyConfig,
        tokens: Arc<TokenManager>,
        api: Arc<dyn SpotifyApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let devices = Arc::new(DeviceCache::new(
            api.clone(),
            clock,
            device_ttl(config.device_cache_ttl_secs),
        ));

        Self {
            config: config.clone(),
            tokens,
            api,
            resolver: DeviceResolver::new(devices.clone()),
            devices,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    pub fn devices(&self) -> &Arc<DeviceCache> {
        &self.devices
    }

    /// Authorization state for display.
    pub async fn auth_status(&self) -> SpotifyResult<AuthStatus> {
        self.tokens.status().await
    }

    /// URL the user opens in a browser to grant access.
    pub fn login_url(&self) -> SpotifyResult<String> {
        authorize_url(&self.config)
    }

    /// Finish the login flow with the code Spotify redirected back with.
    pub async fn complete_login(&self, code: &str) -> SpotifyResult<Credential> {
        let code = code.trim();
        if code.is_empty() {
            return Err(SpotifyError::MissingAuthorizationCode);
        }
        self.tokens.complete_authorization(code).await
    }

    /// Available playback devices (cached).
    pub async fn list_devices(&self) -> SpotifyResult<Vec<DeviceRecord>> {
        self.devices.get_devices().await
    }

    /// Start or resume playback.
    #[instrument(skip(self, request), fields(what = %request.describe()))]
    pub async fn play(&self, request: PlayRequest, device_id: Option<&str>) -> SpotifyResult<PlayReport> {
        let body = build_play_body(&request)?;
        let target = self.resolver.resolve_target(device_id).await?;

        let mut call = ApiRequest::put("/me/player/play").query_opt("device_id", target.as_deref());
        if !body.is_empty() {
            call = call.json(serde_json::to_value(&body)?);
        }

        let response = self.api.send(call).await?;
        classify_playback_response(response).inspect_err(|e| warn!("Play failed: {}", e))?;

        // The device that just started playing is now the active one.
        self.devices.invalidate().await;

        info!("Playback started on {:?}", target);
        Ok(PlayReport {
            what: request.describe(),
            device_id: target,
        })
    }

    /// Pause playback on the given or resolved device.
    #[instrument(skip(self))]
    pub async fn pause(&self, device_id: Option<&str>) -> SpotifyResult<Option<String>> {
        let target = self.resolver.resolve_target(device_id).await?;

        let call = ApiRequest::put("/me/player/pause").query_opt("device_id", target.as_deref());
        let response = self.api.send(call).await?;
        classify_playback_response(response).inspect_err(|e| warn!("Pause failed: {}", e))?;

        info!("Playback paused on {:?}", target);
        Ok(target)
    }

    /// Search tracks by free text.
    #[instrument(skip(self))]
    pub async fn search_tracks(&self, query: &str, limit: u32) -> SpotifyResult<Vec<TrackSummary>> {
        let call = ApiRequest::get("/search")
            .query("q", query)
            .query("type", "track")
            .query("limit", validate_search_limit(limit));

        let response = self.api.send(call).await?;
        if response.status != 200 {
            return Err(SpotifyError::Upstream(response.into_error()));
        }

        parse_search_results(&response.body)
            .map_err(|e| SpotifyError::Upstream(UpstreamError::invalid_response(e.to_string())))
    }

    /// Current playback state, `None` when nothing is playing.
    #[instrument(skip(self))]
    pub async fn now_playing(&self) -> SpotifyResult<Option<NowPlaying>> {
        let response = self.api.send(ApiRequest::get("/me/player")).await?;
        match response.status {
            204 => Ok(None),
            200 => parse_now_playing(&response.body)
                .map(Some)
                .map_err(|e| SpotifyError::Upstream(UpstreamError::invalid_response(e.to_string()))),
            _ => Err(SpotifyError::Upstream(response.into_error())),
        }
    }
}
