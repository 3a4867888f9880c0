//! Now-playing resource.

use rmcp::model::ResourceContents;

use super::{ResourceDefinition, error_text};
use crate::domains::resources::ResourceError;
use crate::domains::resources::service::ResourceKind;
use crate::domains::spotify::SpotifyService;

pub const NOTHING_PLAYING: &str = "No content (nothing playing).";

pub struct NowPlayingResource;

impl ResourceDefinition for NowPlayingResource {
    const URI: &'static str = "spotify://now-playing";
    const NAME: &'static str = "Spotify Now Playing";
    const DESCRIPTION: &'static str =
        "Current playback state as JSON (device, progress and the playing track), or a short note when nothing is playing.";
    const MIME_TYPE: &'static str = "text/plain";

    fn kind() -> ResourceKind {
        ResourceKind::NowPlaying
    }
}

impl NowPlayingResource {
    pub async fn resolve(
        uri: &str,
        service: &SpotifyService,
    ) -> Result<ResourceContents, ResourceError> {
        let text = match service.now_playing().await {
            Ok(Some(now)) => serde_json::to_string_pretty(&now)?,
            Ok(None) => NOTHING_PLAYING.to_string(),
            Err(e) => error_text(&e),
        };
        Ok(ResourceContents::text(text, uri))
    }
}
