//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; the Spotify tools capture the
//! shared service.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    PingTool, SpotifyBeginLoginTool, SpotifyCompleteLoginTool, SpotifyPauseTool, SpotifyPlayTool,
    SpotifySearchTracksTool,
};
use crate::domains::spotify::SpotifyService;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(service: Arc<SpotifyService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SpotifyPlayTool::create_route(service.clone()))
        .with_route(SpotifyPauseTool::create_route(service.clone()))
        .with_route(SpotifySearchTracksTool::create_route(service.clone()))
        .with_route(SpotifyBeginLoginTool::create_route(service.clone()))
        .with_route(SpotifyCompleteLoginTool::create_route(service))
        .with_route(PingTool::create_route())
}
