//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::domains::spotify::SpotifyError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Spotify operation behind the tool failed.
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

/// Argument errors become JSON-RPC `invalid_params`; everything else is an
/// internal error. Spotify failures are normally reported inside the tool
/// result instead of reaching this conversion.
impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidArguments(_) => McpError::invalid_params(err.to_string(), None),
            ToolError::Spotify(_) => McpError::internal_error(err.to_string(), None),
        }
    }
}
