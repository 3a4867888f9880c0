//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
///
/// Spotify failures are not errors at this level: they are rendered into the
/// resource text so the reader sees what went wrong.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err.to_string())
    }
}
