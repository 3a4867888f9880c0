//! Track search tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::common::{failure_result, json_result, parse_params};
use crate::domains::spotify::SpotifyService;
use crate::domains::spotify::search::default_search_limit;

/// Parameters for track search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpotifySearchParams {
    #[schemars(description = "Free-text search query (track, artist, album...)")]
    pub q: String,

    #[schemars(description = "Maximum number of results (default: 5, max: 50)")]
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct SpotifySearchTracksTool;

impl SpotifySearchTracksTool {
    pub const NAME: &'static str = "spotify_search_tracks";

    pub const DESCRIPTION: &'static str = "Search tracks by text. Returns a small JSON list with uri, name, artist, album and duration_ms. Pass a result's uri to spotify_play as track_uri.";

    pub async fn execute(params: &SpotifySearchParams, service: &SpotifyService) -> CallToolResult {
        info!("Searching tracks matching: {}", params.q);
        match service.search_tracks(&params.q, params.limit).await {
            Ok(tracks) => json_result(&tracks),
            Err(e) => failure_result("Search", &e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifySearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(service: Arc<SpotifyService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let service = service.clone();
            async move {
                let params: SpotifySearchParams = parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
