//! Configuration management for the MCP server.
//!
//! Configuration is built from defaults, then overridden by environment
//! variables (a `.env` file in the working directory is honoured).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::domains::spotify::credential::parse_scopes;
use crate::domains::spotify::devices::{DEFAULT_DEVICE_TTL_SECS, MAX_DEVICE_TTL_SECS};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8787/callback";
pub const DEFAULT_SCOPES: &str =
    "user-modify-playback-state user-read-playback-state user-read-currently-playing";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Spotify application and endpoint settings.
    pub spotify: SpotifyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Spotify application credentials and endpoints.
#[derive(Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    /// Must match a redirect URI registered for the application.
    pub redirect_uri: String,

    /// Scopes requested during login.
    pub scopes: Vec<String>,

    /// Where the credential is persisted between runs.
    pub token_path: PathBuf,

    pub api_base_url: String,
    pub accounts_base_url: String,

    /// How long a fetched device list is served from memory.
    pub device_cache_ttl_secs: i64,

    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("token_path", &self.token_path)
            .field("api_base_url", &self.api_base_url)
            .field("accounts_base_url", &self.accounts_base_url)
            .field("device_cache_ttl_secs", &self.device_cache_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: parse_scopes(DEFAULT_SCOPES),
            token_path: PathBuf::from("tokens.json"),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            device_cache_ttl_secs: DEFAULT_DEVICE_TTL_SECS,
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl SpotifyConfig {
    /// Whether both halves of the application credential are present.
    pub fn has_client_credentials(&self) -> bool {
        self.client_id.as_deref().is_some_and(|s| !s.is_empty())
            && self.client_secret.as_deref().is_some_and(|s| !s.is_empty())
    }

    fn apply_env(&mut self) {
        if let Some(id) = non_empty_var("SPOTIFY_CLIENT_ID") {
            self.client_id = Some(id);
        }
        if let Some(secret) = non_empty_var("SPOTIFY_CLIENT_SECRET") {
            self.client_secret = Some(secret);
        }
        if let Some(uri) = non_empty_var("SPOTIFY_REDIRECT_URI") {
            self.redirect_uri = uri;
        }
        if let Some(scopes) = non_empty_var("SPOTIFY_SCOPES") {
            self.scopes = parse_scopes(&scopes);
        }
        if let Some(path) = non_empty_var("SPOTIFY_TOKENS_PATH") {
            self.token_path = PathBuf::from(path);
        }
        if let Some(url) = non_empty_var("SPOTIFY_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(url) = non_empty_var("SPOTIFY_ACCOUNTS_BASE_URL") {
            self.accounts_base_url = url;
        }

        parse_var("MCP_DEVICE_CACHE_TTL_SECS", &mut self.device_cache_ttl_secs);
        if !(0..=MAX_DEVICE_TTL_SECS).contains(&self.device_cache_ttl_secs) {
            warn!(
                "MCP_DEVICE_CACHE_TTL_SECS={} out of range 0..={}, using {}",
                self.device_cache_ttl_secs, MAX_DEVICE_TTL_SECS, DEFAULT_DEVICE_TTL_SECS
            );
            self.device_cache_ttl_secs = DEFAULT_DEVICE_TTL_SECS;
        }
        parse_var("MCP_HTTP_TIMEOUT_SECS", &mut self.request_timeout_secs);
        parse_var("MCP_HTTP_CONNECT_TIMEOUT_SECS", &mut self.connect_timeout_secs);
    }

    /// Log whether the application credential is usable. Missing values are
    /// not fatal: resources that need no token keep working.
    pub fn report_credentials(&self) {
        if self.has_client_credentials() {
            info!("Spotify client credentials loaded from environment");
        } else {
            warn!(
                "SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set - login and token \
                 refresh will fail until they are provided"
            );
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr + std::fmt::Display>(key: &str, target: &mut T) {
    if let Some(raw) = non_empty_var(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!("Ignoring invalid {}={:?}, keeping {}", key, raw, target),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "spotify-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            spotify: SpotifyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); application settings use `SPOTIFY_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = non_empty_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = non_empty_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.spotify.apply_env();

        config
    }
}
