//! Start or resume playback.

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

use super::common::{failure_result, parse_params, success_result};
use crate::domains::spotify::{PlayRequest, SpotifyService};

/// Parameters for the play tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SpotifyPlayParams {
    /// A single track to play.
    #[schemars(description = "Spotify URI of a single track (spotify:track:...)")]
    #[serde(default)]
    pub track_uri: Option<String>,

    /// An album, playlist or artist to play.
    #[schemars(description = "Spotify URI of an album, playlist or artist")]
    #[serde(default)]
    pub context_uri: Option<String>,

    /// An explicit list of tracks to play.
    #[schemars(description = "List of track URIs to play in order")]
    #[serde(default)]
    pub uris: Option<Vec<String>>,

    /// Start offset within the first track.
    #[schemars(description = "Start position in milliseconds (>= 0)")]
    #[serde(default)]
    pub position_ms: Option<i64>,

    /// Device to play on; defaults to the active device.
    #[schemars(description = "Target device id (falls back to the active device)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

impl From<&SpotifyPlayParams> for PlayRequest {
    fn from(params: &SpotifyPlayParams) -> Self {
        PlayRequest {
            track_uri: params.track_uri.clone(),
            context_uri: params.context_uri.clone(),
            uris: params.uris.clone(),
            position_ms: params.position_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyPlayTool;

impl SpotifyPlayTool {
    pub const NAME: &'static str = "spotify_play";

    pub const DESCRIPTION: &'static str = "Start or resume playback. Use at most one of: track_uri, context_uri, uris. With none of them the current context resumes. Optionally pass position_ms and/or a device_id (falls back to the active device).";

    pub async fn execute(params: &SpotifyPlayParams, service: &SpotifyService) -> CallToolResult {
        info!("Play requested");
        match service
            .play(PlayRequest::from(params), params.device_id.as_deref())
            .await
        {
            Ok(report) => {
                let target = report
                    .device_id
                    .unwrap_or_else(|| "(default/active device)".to_string());
                success_result(format!("Playing {} on {}.", report.what, target))
            }
            Err(e) => failure_result("Play", &e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifyPlayParams>(),
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
                let params: SpotifyPlayParams = parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
