//! Authorization status resource.

use rmcp::model::ResourceContents;

use super::{ResourceDefinition, error_text};
use crate::domains::resources::ResourceError;
use crate::domains::resources::service::ResourceKind;
use crate::domains::spotify::{AuthStatus, SpotifyService};

/// Whether a credential is stored, and until when it is valid.
pub struct AuthStatusResource;

impl ResourceDefinition for AuthStatusResource {
    const URI: &'static str = "spotify://auth/status";
    const NAME: &'static str = "Spotify Auth Status";
    const DESCRIPTION: &'static str = "Shows whether Spotify tokens are stored and when they expire: the word `missing`, or a JSON object with status, scopes and expires_at. Use spotify_begin_login to obtain tokens first.";
    const MIME_TYPE: &'static str = "text/plain";

    fn kind() -> ResourceKind {
        ResourceKind::AuthStatus
    }
}

impl AuthStatusResource {
    /// Never touches the network.
    pub async fn resolve(
        uri: &str,
        service: &SpotifyService,
    ) -> Result<ResourceContents, ResourceError> {
        let text = match service.auth_status().await {
            Ok(AuthStatus::Unauthenticated) => "missing".to_string(),
            Ok(status) => serde_json::to_string_pretty(&status)?,
            Err(e) => error_text(&e),
        };
        Ok(ResourceContents::text(text, uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::service::resource_text;
    use crate::domains::spotify::testing::Harness;

    #[tokio::test]
    async fn test_missing() {
        let h = Harness::unauthenticated();
        let contents = AuthStatusResource::resolve(AuthStatusResource::URI, &h.service)
            .await
            .unwrap();
        assert_eq!(resource_text(&contents), "missing");
    }

    #[test]
    fn test_mime_type_covers_plain_body() {
        let entry = crate::domains::resources::registry::get_all_resources()
            .into_iter()
            .find(|e| e.resource.uri == AuthStatusResource::URI)
            .unwrap();
        assert_eq!(entry.resource.mime_type.as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_authorized() {
        let h = Harness::authorized();
        let contents = AuthStatusResource::resolve(AuthStatusResource::URI, &h.service)
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(resource_text(&contents)).unwrap();
        assert_eq!(json["status"], "authorized");
        assert_eq!(json["expires_at"], 1735736400);
        assert!(json["scopes"].is_array());
        assert_eq!(h.endpoint.calls(), 0);
        assert_eq!(h.api.calls(), 0);
    }
}
