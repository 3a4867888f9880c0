//! Slim view of the current playback state (`GET /me/player`).

use serde::{Deserialize, Serialize};

use super::search::{NamedObject, RawTrack};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
    pub is_playing: Option<bool>,
    pub device: Option<String>,
    pub progress_ms: Option<u64>,
    pub track: Option<NowPlayingTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlayingTrack {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlayerPayload {
    #[serde(default)]
    is_playing: Option<bool>,
    #[serde(default)]
    device: Option<NamedObject>,
    #[serde(default)]
    progress_ms: Option<u64>,
    #[serde(default)]
    item: Option<RawTrack>,
}

/// Parse a `GET /me/player` body. Podcast episodes and other non-track items
/// still carry name and uri, which is all this view needs.
pub fn parse_now_playing(body: &str) -> Result<NowPlaying, serde_json::Error> {
    let payload: PlayerPayload = serde_json::from_str(body)?;

    Ok(NowPlaying {
        is_playing: payload.is_playing,
        device: payload.device.and_then(|d| d.name),
        progress_ms: payload.progress_ms,
        track: payload.item.map(|item| NowPlayingTrack {
            artists: item.artist_names(),
            album: item.album_name(),
            name: item.name,
            uri: item.uri,
            duration_ms: item.duration_ms,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_now_playing() {
        let body = r#"{
            "is_playing": true,
            "progress_ms": 1200,
            "device": {"id": "d1", "name": "Kitchen"},
            "item": {
                "uri": "spotify:track:1",
                "name": "Teardrop",
                "artists": [{"name": "Massive Attack"}],
                "album": {"name": "Mezzanine"},
                "duration_ms": 329000
            }
        }"#;

        let now = parse_now_playing(body).unwrap();
        assert_eq!(now.is_playing, Some(true));
        assert_eq!(now.device.as_deref(), Some("Kitchen"));
        let track = now.track.unwrap();
        assert_eq!(track.artists, vec!["Massive Attack"]);
        assert_eq!(track.album.as_deref(), Some("Mezzanine"));
    }

    #[test]
    fn test_parse_item_with_null_fields() {
        let body = r#"{
            "is_playing": true,
            "item": {"uri": null, "name": null, "artists": null, "album": null}
        }"#;

        let now = parse_now_playing(body).unwrap();
        let track = now.track.unwrap();
        assert_eq!(track.uri, None);
        assert_eq!(track.name, None);
        assert!(track.artists.is_empty());
    }

    #[test]
    fn test_parse_without_item() {
        let now = parse_now_playing(r#"{"is_playing": false, "item": null}"#).unwrap();
        assert_eq!(now.track, None);
        assert_eq!(now.device, None);

        let json = serde_json::to_value(&now).unwrap();
        assert!(json["track"].is_null());
    }
}
