//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools and resources domains. Both share one
//! [`SpotifyService`], so a credential refreshed by a tool call is the one a
//! resource read sees.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and routed by `domains/tools/router.rs`; adding a tool does not touch this
//! file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    spotify::SpotifyService,
    tools::build_tool_router,
};

const INSTRUCTIONS: &str = "Controls Spotify playback. Read spotify://auth/status first; if it \
says \"missing\", call spotify_begin_login and then spotify_complete_login with the code. Use \
spotify_search_tracks to find a track URI and spotify_play to play it; spotify://devices and \
spotify://now-playing show the current state.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server backed by the real Spotify endpoints.
    pub fn from_config(config: Config) -> super::Result<Self> {
        let spotify = Arc::new(SpotifyService::from_config(&config.spotify)?);
        Ok(Self::new(config, spotify))
    }

    /// Create a server around an existing Spotify service.
    pub fn new(config: Config, spotify: Arc<SpotifyService>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(spotify.clone()),
            resource_service: Arc::new(ResourceService::new(spotify)),
            config: Arc::new(config),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                ResourceError::Internal(_) => McpError::internal_error(e.to_string(), None),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::testing::Harness;

    fn test_server() -> McpServer {
        let h = Harness::unauthenticated();
        McpServer::new(Config::default(), h.service.clone())
    }

    #[test]
    fn test_server_identity() {
        let server = test_server();
        assert_eq!(server.name(), "spotify-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_server_info() {
        let server = test_server();
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.unwrap().contains("spotify_begin_login"));
    }

    #[test]
    fn test_server_routes_all_tools() {
        let server = test_server();
        let names: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert!(names.contains(&"spotify_play".to_string()));
        assert!(names.contains(&"ping".to_string()));
    }

    #[tokio::test]
    async fn test_resources_listed() {
        let server = test_server();
        let resources = server.resource_service.list_resources().await;
        assert_eq!(resources.len(), 3);
    }
}
