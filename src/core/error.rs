//! Error types and handling for the MCP server.
//!
//! Each domain has its own error type; this module folds them into one
//! [`Error`] for code that spans domains, such as startup.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the Spotify domain.
    #[error("Spotify error: {0}")]
    Spotify(#[from] crate::domains::spotify::SpotifyError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
