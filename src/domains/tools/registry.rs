//! Tool Registry - the list of every tool the server exposes.

use rmcp::model::Tool;

use super::definitions::{
    PingTool, SpotifyBeginLoginTool, SpotifyCompleteLoginTool, SpotifyPauseTool, SpotifyPlayTool,
    SpotifySearchTracksTool,
};

/// Tool registry - names and metadata of all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            SpotifyPlayTool::NAME,
            SpotifyPauseTool::NAME,
            SpotifySearchTracksTool::NAME,
            SpotifyBeginLoginTool::NAME,
            SpotifyCompleteLoginTool::NAME,
            PingTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SpotifyPlayTool::to_tool(),
            SpotifyPauseTool::to_tool(),
            SpotifySearchTracksTool::to_tool(),
            SpotifyBeginLoginTool::to_tool(),
            SpotifyCompleteLoginTool::to_tool(),
            PingTool::to_tool(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"spotify_play"));
        assert!(names.contains(&"spotify_pause"));
        assert!(names.contains(&"spotify_search_tracks"));
        assert!(names.contains(&"spotify_begin_login"));
        assert!(names.contains(&"spotify_complete_login"));
        assert!(names.contains(&"ping"));
    }

    #[test]
    fn test_tools_have_descriptions() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some_and(|d| !d.is_empty()), "{}", tool.name);
        }
    }
}
