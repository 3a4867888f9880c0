//! Helpers shared by the Spotify tools: argument parsing, result building and
//! human-readable wording for playback failures.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::spotify::SpotifyError;
use crate::domains::tools::ToolError;

/// Deserialize tool arguments; a missing argument object counts as empty.
pub fn parse_params<P: DeserializeOwned>(
    arguments: Option<serde_json::Map<String, serde_json::Value>>,
) -> Result<P, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result holding pretty-printed JSON.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(json) => success_result(json),
        Err(e) => error_result(&format!("Failed to encode result: {}", e)),
    }
}

/// What the user should read when `action` failed with `err`.
pub fn failure_message(action: &str, err: &SpotifyError) -> String {
    match err {
        SpotifyError::NoActiveDevice => {
            "No active device. Open Spotify on any device or pass a device_id, then try again."
                .to_string()
        }
        SpotifyError::PremiumRequired => "Playback control requires Spotify Premium.".to_string(),
        SpotifyError::Unauthorized => {
            "Unauthorized (token likely expired or missing). Re-run login and try again."
                .to_string()
        }
        SpotifyError::Unauthenticated => {
            "Not authorized yet. Call spotify_begin_login to start the Spotify login flow."
                .to_string()
        }
        SpotifyError::InvalidPlaybackArgs(msg) => format!("Invalid arguments: {}", msg),
        SpotifyError::MissingAuthorizationCode => {
            "Invalid arguments: pass the `code` parameter from the redirect URL.".to_string()
        }
        other => format!("{} failed: {}", action, other),
    }
}

/// Error result for a failed Spotify operation.
pub fn failure_result(action: &str, err: &SpotifyError) -> CallToolResult {
    error_result(&failure_message(action, err))
}

/// First text block of a result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
