//! Spotify MCP Server Library
//!
//! Exposes Spotify playback control, track search and the OAuth login flow
//! as Model Context Protocol tools and resources.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and the
//!   STDIO transport
//! - **domains**: business logic organized by bounded contexts
//!   - **spotify**: credentials, token refresh, device cache and Web API calls
//!   - **tools**: MCP tools that can be executed by clients
//!   - **resources**: data resources that can be read by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use spotify_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::from_config(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
