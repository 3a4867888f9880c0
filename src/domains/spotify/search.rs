//! Track search results.

use serde::{Deserialize, Serialize};

/// Default number of tracks returned by a search.
pub fn default_search_limit() -> u32 {
    5
}

/// Clamp a search limit to the range the API accepts (1-50).
pub fn validate_search_limit(limit: u32) -> u32 {
    limit.clamp(1, 50)
}

/// A small, readable view of one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSummary {
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Option<Vec<RawTrack>>,
}

/// A track (or episode) object as Spotify returns it. Every field may be
/// missing or null.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<NamedObject>>,
    #[serde(default)]
    pub album: Option<NamedObject>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedObject {
    #[serde(default)]
    pub name: Option<String>,
}

impl RawTrack {
    pub(crate) fn artist_names(&self) -> Vec<String> {
        self.artists
            .iter()
            .flatten()
            .filter_map(|a| a.name.clone())
            .collect()
    }

    pub(crate) fn album_name(&self) -> Option<String> {
        self.album.as_ref().and_then(|a| a.name.clone())
    }
}

/// Parse a `GET /search?type=track` body.
pub fn parse_search_results(body: &str) -> Result<Vec<TrackSummary>, serde_json::Error> {
    let payload: SearchPayload = serde_json::from_str(body)?;
    let items = payload.tracks.and_then(|t| t.items).unwrap_or_default();

    // Results without a URI are dropped.
    Ok(items
        .into_iter()
        .filter_map(|track| {
            Some(TrackSummary {
                artist: track.artist_names().join(", "),
                album: track.album_name(),
                name: track.name.unwrap_or_default(),
                uri: track.uri.filter(|u| !u.is_empty())?,
                duration_ms: track.duration_ms,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_results() {
        let body = r#"{"tracks": {"items": [
            {
                "uri": "spotify:track:1",
                "name": "Teardrop",
                "artists": [{"name": "Massive Attack"}, {"name": "Elizabeth Fraser"}],
                "album": {"name": "Mezzanine"},
                "duration_ms": 329000
            },
            {"uri": "spotify:track:2", "name": "Bare"}
        ]}}"#;

        let tracks = parse_search_results(body).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist, "Massive Attack, Elizabeth Fraser");
        assert_eq!(tracks[0].album.as_deref(), Some("Mezzanine"));
        assert_eq!(tracks[0].duration_ms, Some(329000));
        assert_eq!(tracks[1].artist, "");
        assert_eq!(tracks[1].album, None);
    }

    #[test]
    fn test_parse_skips_tracks_without_uri() {
        let body = r#"{"tracks": {"items": [
            {"uri": null, "name": "Local file"},
            {"name": "No uri at all"},
            {"uri": "spotify:track:3", "name": null}
        ]}}"#;

        let tracks = parse_search_results(body).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].uri, "spotify:track:3");
        assert_eq!(tracks[0].name, "");
    }

    #[test]
    fn test_parse_empty_results() {
        assert!(parse_search_results(r#"{"tracks": null}"#).unwrap().is_empty());
        assert!(parse_search_results(r#"{"tracks": {"items": []}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_validate_search_limit() {
        assert_eq!(validate_search_limit(0), 1);
        assert_eq!(validate_search_limit(5), 5);
        assert_eq!(validate_search_limit(200), 50);
    }
}
