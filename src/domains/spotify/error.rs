//! Spotify-specific error types.
//!
//! Every failure carries enough structure for a caller to branch on its kind;
//! upstream failures keep the status code and body returned by Spotify.

use thiserror::Error;

/// A failed outbound call to the Spotify accounts service or Web API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The remote side answered with a non-success status.
    #[error("{status} {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A refresh was needed but no refresh token was ever issued.
    #[error("no refresh token stored")]
    MissingRefreshToken,
}

impl UpstreamError {
    /// Create a status error from a response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status code, when the remote side answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {}", e))
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Errors produced by the credential lifecycle, device resolution and
/// playback layers.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// No credential has ever been obtained.
    #[error("Not authorized yet. Complete the Spotify login flow first.")]
    Unauthenticated,

    /// The authorization code handed in was empty.
    #[error("Authorization code is empty")]
    MissingAuthorizationCode,

    /// Exchanging the one-time authorization code failed.
    #[error("Authorization code exchange failed: {0}")]
    AuthorizationExchangeFailed(#[source] UpstreamError),

    /// Refreshing a stale access token failed.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(#[source] UpstreamError),

    /// Listing playback devices failed.
    #[error("devices API failed: {0}")]
    DeviceFetchFailed(#[source] UpstreamError),

    /// The play arguments were contradictory or out of range.
    #[error("{0}")]
    InvalidPlaybackArgs(String),

    /// Spotify reported that no device is available for playback.
    #[error("No active device")]
    NoActiveDevice,

    /// The account is not allowed to control playback.
    #[error("Playback control requires Spotify Premium")]
    PremiumRequired,

    /// Spotify rejected the bearer token.
    #[error("Unauthorized (token likely expired or missing)")]
    Unauthorized,

    /// Any other failed Web API call, reported verbatim.
    #[error("{0}")]
    Upstream(#[from] UpstreamError),

    /// Reading or writing the credential file failed.
    #[error("Credential storage error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed (credential file, request bodies).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OAuth client settings are missing or unusable.
    #[error("Spotify configuration error: {0}")]
    Config(String),
}

impl SpotifyError {
    /// Create an "invalid playback args" error.
    pub fn invalid_playback_args(msg: impl Into<String>) -> Self {
        Self::InvalidPlaybackArgs(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The upstream failure behind this error, if any.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            Self::AuthorizationExchangeFailed(e)
            | Self::RefreshFailed(e)
            | Self::DeviceFetchFailed(e)
            | Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for Spotify operations.
pub type SpotifyResult<T> = std::result::Result<T, SpotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = UpstreamError::status(400, "invalid_grant");
        assert_eq!(err.to_string(), "400 invalid_grant");
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_upstream_accessor() {
        let err = SpotifyError::RefreshFailed(UpstreamError::MissingRefreshToken);
        assert_eq!(err.upstream(), Some(&UpstreamError::MissingRefreshToken));
        assert!(SpotifyError::Unauthenticated.upstream().is_none());
    }

    #[test]
    fn test_missing_code_is_not_upstream() {
        let err = SpotifyError::MissingAuthorizationCode;
        assert!(err.upstream().is_none());
        assert_eq!(err.to_string(), "Authorization code is empty");
    }

    #[test]
    fn test_device_fetch_failed_message() {
        let err = SpotifyError::DeviceFetchFailed(UpstreamError::status(502, "bad gateway"));
        assert_eq!(err.to_string(), "devices API failed: 502 bad gateway");
    }
}
