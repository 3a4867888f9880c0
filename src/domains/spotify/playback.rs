//! Play request payloads and interpretation of play/pause responses.

use serde::Serialize;

use super::client::ApiResponse;
use super::error::{SpotifyError, SpotifyResult};

/// Arguments of a play command, as given by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayRequest {
    pub track_uri: Option<String>,
    pub context_uri: Option<String>,
    pub uris: Option<Vec<String>>,
    pub position_ms: Option<i64>,
}

impl PlayRequest {
    /// Human-readable name of what is about to play.
    pub fn describe(&self) -> String {
        self.context_uri
            .clone()
            .or_else(|| self.uris.as_ref().and_then(|u| u.first().cloned()))
            .or_else(|| self.track_uri.clone())
            .unwrap_or_else(|| "current context".to_string())
    }
}

/// Body of `PUT /me/player/play`. Empty means "resume the current context".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

impl PlayBody {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validate play arguments and build the request body.
///
/// At most one of `track_uri`, `context_uri` and `uris` may be given; a single
/// track is sent in list form.
pub fn build_play_body(request: &PlayRequest) -> SpotifyResult<PlayBody> {
    let provided = [
        request.track_uri.is_some(),
        request.context_uri.is_some(),
        request.uris.is_some(),
    ]
    .into_iter()
    .filter(|p| *p)
    .count();

    if provided > 1 {
        return Err(SpotifyError::invalid_playback_args(
            "Provide only one of: context_uri, uris, track_uri.",
        ));
    }

    let mut body = PlayBody {
        context_uri: request.context_uri.clone(),
        uris: request
            .uris
            .clone()
            .or_else(|| request.track_uri.clone().map(|uri| vec![uri])),
        position_ms: None,
    };

    if let Some(position) = request.position_ms {
        let position = u64::try_from(position)
            .map_err(|_| SpotifyError::invalid_playback_args("position_ms must be >= 0"))?;
        body.position_ms = Some(position);
    }

    Ok(body)
}

const NO_ACTIVE_DEVICE: &str = "NO_ACTIVE_DEVICE";
const PREMIUM_REQUIRED: &str = "PREMIUM_REQUIRED";

/// Map a play/pause response onto its named outcome. Both 200 and 204 count
/// as success.
pub fn classify_playback_response(response: ApiResponse) -> SpotifyResult<()> {
    match response.status {
        200 | 204 => Ok(()),
        404 if response.body.contains(NO_ACTIVE_DEVICE) => Err(SpotifyError::NoActiveDevice),
        403 if response.body.contains(PREMIUM_REQUIRED) => Err(SpotifyError::PremiumRequired),
        401 => Err(SpotifyError::Unauthorized),
        _ => Err(SpotifyError::Upstream(response.into_error())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::error::UpstreamError;
    use serde_json::json;

    fn body_json(request: PlayRequest) -> serde_json::Value {
        serde_json::to_value(build_play_body(&request).unwrap()).unwrap()
    }

    #[test]
    fn test_track_uri_becomes_list() {
        let request = PlayRequest {
            track_uri: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(body_json(request), json!({"uris": ["x"]}));
    }

    #[test]
    fn test_context_uri() {
        let request = PlayRequest {
            context_uri: Some("spotify:album:1".to_string()),
            ..Default::default()
        };
        assert_eq!(body_json(request), json!({"context_uri": "spotify:album:1"}));
    }

    #[test]
    fn test_uris_pass_through() {
        let request = PlayRequest {
            uris: Some(vec!["y".to_string()]),
            ..Default::default()
        };
        assert_eq!(body_json(request), json!({"uris": ["y"]}));
    }

    #[test]
    fn test_no_arguments_resumes() {
        let body = build_play_body(&PlayRequest::default()).unwrap();
        assert!(body.is_empty());
        assert_eq!(serde_json::to_value(body).unwrap(), json!({}));
    }

    #[test]
    fn test_more_than_one_source_rejected() {
        let request = PlayRequest {
            context_uri: Some("c".to_string()),
            uris: Some(vec!["y".to_string()]),
            ..Default::default()
        };
        assert!(matches!(
            build_play_body(&request),
            Err(SpotifyError::InvalidPlaybackArgs(_))
        ));
    }

    #[test]
    fn test_negative_position_rejected() {
        let request = PlayRequest {
            position_ms: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            build_play_body(&request),
            Err(SpotifyError::InvalidPlaybackArgs(_))
        ));
    }

    #[test]
    fn test_position_added() {
        let request = PlayRequest {
            track_uri: Some("x".to_string()),
            position_ms: Some(30000),
            ..Default::default()
        };
        assert_eq!(body_json(request), json!({"uris": ["x"], "position_ms": 30000}));

        let resume_at = PlayRequest {
            position_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(body_json(resume_at), json!({"position_ms": 0}));
    }

    #[test]
    fn test_describe() {
        let request = PlayRequest {
            uris: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };
        assert_eq!(request.describe(), "a");
        assert_eq!(PlayRequest::default().describe(), "current context");
    }

    #[test]
    fn test_classify_success() {
        assert!(classify_playback_response(ApiResponse::new(204, "")).is_ok());
        assert!(classify_playback_response(ApiResponse::new(200, "{}")).is_ok());
    }

    #[test]
    fn test_classify_named_outcomes() {
        let no_device = ApiResponse::new(
            404,
            r#"{"error":{"status":404,"message":"Player command failed: No active device found","reason":"NO_ACTIVE_DEVICE"}}"#,
        );
        assert!(matches!(
            classify_playback_response(no_device),
            Err(SpotifyError::NoActiveDevice)
        ));

        let premium = ApiResponse::new(403, r#"{"error":{"reason":"PREMIUM_REQUIRED"}}"#);
        assert!(matches!(
            classify_playback_response(premium),
            Err(SpotifyError::PremiumRequired)
        ));

        assert!(matches!(
            classify_playback_response(ApiResponse::new(401, "expired")),
            Err(SpotifyError::Unauthorized)
        ));
    }

    #[test]
    fn test_classify_other_failures_verbatim() {
        let result = classify_playback_response(ApiResponse::new(404, "not found"));
        match result {
            Err(SpotifyError::Upstream(e)) => assert_eq!(e, UpstreamError::status(404, "not found")),
            other => panic!("expected Upstream, got {:?}", other),
        }

        assert!(matches!(
            classify_playback_response(ApiResponse::new(403, "forbidden")),
            Err(SpotifyError::Upstream(_))
        ));
    }
}
