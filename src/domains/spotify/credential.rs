//! The persisted OAuth credential and its storage.
//!
//! The credential file is a flat JSON document:
//!
//! ```json
//! {
//!   "access_token": "...",
//!   "refresh_token": "...",
//!   "expires_at": 1735732800,
//!   "scopes": "user-modify-playback-state user-read-playback-state"
//! }
//! ```
//!
//! Presence of the file is what "authenticated" means; nothing in this crate
//! ever deletes it.

use chrono::{DateTime, Duration, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use super::error::{SpotifyResult, UpstreamError};

/// Refresh this long before the recorded expiry.
pub const STALENESS_MARGIN_SECS: i64 = 10;

/// An access/refresh token pair with its expiry and granted scopes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,

    /// Absent only if Spotify never issued one.
    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,

    #[serde(default, with = "space_delimited")]
    pub scopes: Vec<String>,
}

impl Credential {
    /// Whether the access token should be refreshed before use.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at - Duration::seconds(STALENESS_MARGIN_SECS)
    }
}

/// Custom Debug implementation to redact tokens from logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Scopes are stored the way OAuth transmits them: one space-separated string.
mod space_delimited {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(scopes: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&scopes.join(" "))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Joined(s)) => super::parse_scopes(&s),
            Some(Raw::List(list)) => list,
            None => Vec::new(),
        })
    }
}

/// Split a space-separated scope string.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Absolute expiry for a token issued at `now` with a lifetime of
/// `expires_in` seconds.
///
/// Truncated to whole seconds, the precision the credential file keeps, so a
/// credential held in memory equals the one read back from disk.
pub fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, UpstreamError> {
    TimeDelta::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .and_then(|at| DateTime::from_timestamp(at.timestamp(), 0))
        .ok_or_else(|| UpstreamError::invalid_response(format!("expires_in out of range: {}", expires_in)))
}

/// Durable persistence of the current credential.
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, `None` if none was ever saved.
    fn load(&self) -> SpotifyResult<Option<Credential>>;

    /// Replace the stored credential as a whole.
    fn save(&self, credential: &Credential) -> SpotifyResult<()>;
}

/// Stores the credential as a JSON file.
///
/// Each save goes to its own uniquely named temp file in the same directory,
/// which is then renamed over the target. A concurrent reader, or another
/// process saving at the same time, sees either the old record or a new one.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> SpotifyResult<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, credential: &Credential) -> SpotifyResult<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(credential)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Credential written to {}", self.path.display());
        Ok(())
    }
}
