//! Liveness check.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::spotify::common::success_result;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PingParams {}

#[derive(Debug, Clone)]
pub struct PingTool;

impl PingTool {
    pub const NAME: &'static str = "ping";

    pub const DESCRIPTION: &'static str = "Quick sanity check. Answers \"pong\".";

    pub fn execute() -> CallToolResult {
        success_result("pong".to_string())
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PingParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |_ctx: ToolCallContext<'_, S>| {
            async move { Ok(Self::execute()) }.boxed()
        })
    }
}
