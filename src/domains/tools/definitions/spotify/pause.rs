//! Pause playback.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use super::common::{failure_result, parse_params, success_result};
use crate::domains::spotify::SpotifyService;

/// Parameters for the pause tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SpotifyPauseParams {
    #[schemars(description = "Device to pause (falls back to the active device)")]
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SpotifyPauseTool;

impl SpotifyPauseTool {
    pub const NAME: &'static str = "spotify_pause";

    pub const DESCRIPTION: &'static str =
        "Pause playback on the active device, or on device_id when given.";

    pub async fn execute(params: &SpotifyPauseParams, service: &SpotifyService) -> CallToolResult {
        match service.pause(params.device_id.as_deref()).await {
            Ok(_) => success_result("Paused.".to_string()),
            Err(e) => failure_result("Pause", &e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifyPauseParams>(),
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
                let params: SpotifyPauseParams = parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::ApiResponse;
    use crate::domains::spotify::testing::{Harness, devices_body};
    use crate::domains::tools::definitions::spotify::common::result_text;

    #[tokio::test]
    async fn test_pause() {
        let h = Harness::authorized();
        h.api.respond_with(|req| match req.path.as_str() {
            "/me/player/devices" => Ok(ApiResponse::new(200, devices_body(&[("a", true)]))),
            _ => Ok(ApiResponse::new(204, "")),
        });

        let result = SpotifyPauseTool::execute(&SpotifyPauseParams::default(), &h.service).await;
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result_text(&result), "Paused.");
        assert_eq!(h.api.last_request().unwrap().query_value("device_id"), Some("a"));
    }

    #[tokio::test]
    async fn test_pause_unauthorized() {
        let h = Harness::authorized();
        h.api.respond_with(|req| match req.path.as_str() {
            "/me/player/pause" => Ok(ApiResponse::new(401, "token expired")),
            _ => Ok(ApiResponse::new(200, devices_body(&[]))),
        });

        let result = SpotifyPauseTool::execute(&SpotifyPauseParams::default(), &h.service).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Unauthorized"));
    }

    #[tokio::test]
    async fn test_pause_before_login() {
        let h = Harness::unauthenticated();
        h.api.respond_with(|_| Err(crate::domains::spotify::SpotifyError::Unauthenticated));

        let result = SpotifyPauseTool::execute(&SpotifyPauseParams::default(), &h.service).await;
        assert!(result_text(&result).contains("spotify_begin_login"));
    }
}
