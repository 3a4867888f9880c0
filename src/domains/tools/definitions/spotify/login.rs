//! Login tools: hand out the authorization URL and exchange the code the
//! browser was redirected back with.

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

use super::common::{error_result, failure_result, parse_params, success_result};
use crate::domains::spotify::SpotifyService;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SpotifyBeginLoginParams {}

#[derive(Debug, Clone)]
pub struct SpotifyBeginLoginTool;

impl SpotifyBeginLoginTool {
    pub const NAME: &'static str = "spotify_begin_login";

    pub const DESCRIPTION: &'static str = "Get the Spotify authorization URL. Open it in a browser, approve access, then pass the `code` parameter of the redirect URL to spotify_complete_login.";

    pub fn execute(service: &SpotifyService) -> CallToolResult {
        match service.login_url() {
            Ok(url) => success_result(format!(
                "Open this URL in a browser and approve access:\n{}\n\n\
                 Then copy the `code` query parameter from the page you are redirected to \
                 and call spotify_complete_login with it.",
                url
            )),
            Err(e) => error_result(&format!("Cannot start login: {}", e)),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifyBeginLoginParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let service = service.clone();
            async move { Ok(Self::execute(&service)) }.boxed()
        })
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpotifyCompleteLoginParams {
    #[schemars(description = "The `code` query parameter from the login redirect")]
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyCompleteLoginTool;

impl SpotifyCompleteLoginTool {
    pub const NAME: &'static str = "spotify_complete_login";

    pub const DESCRIPTION: &'static str = "Finish the Spotify login by exchanging the authorization code for tokens. The tokens are saved and refreshed automatically afterwards.";

    pub async fn execute(
        params: &SpotifyCompleteLoginParams,
        service: &SpotifyService,
    ) -> CallToolResult {
        match service.complete_login(&params.code).await {
            Ok(credential) => {
                info!("Spotify login completed");
                success_result(format!(
                    "Authorized. Access token valid until {}. Scopes: {}.",
                    credential.expires_at.to_rfc3339(),
                    credential.scopes.join(" ")
                ))
            }
            Err(e) => failure_result("Login", &e),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpotifyCompleteLoginParams>(),
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
                let params: SpotifyCompleteLoginParams =
                    parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
