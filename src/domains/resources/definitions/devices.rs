//! Playback devices resource.

use rmcp::model::ResourceContents;

use super::{ResourceDefinition, error_text};
use crate::domains::resources::ResourceError;
use crate::domains::resources::service::ResourceKind;
use crate::domains::spotify::SpotifyService;

pub struct DevicesResource;

impl ResourceDefinition for DevicesResource {
    const URI: &'static str = "spotify://devices";
    const NAME: &'static str = "Spotify Devices";
    const DESCRIPTION: &'static str =
        "Available playback devices (id, name, active, volume, type). Served from a short-lived cache.";
    const MIME_TYPE: &'static str = "application/json";

    fn kind() -> ResourceKind {
        ResourceKind::Devices
    }
}

impl DevicesResource {
    pub async fn resolve(
        uri: &str,
        service: &SpotifyService,
    ) -> Result<ResourceContents, ResourceError> {
        let text = match service.list_devices().await {
            Ok(devices) => serde_json::to_string_pretty(&devices)?,
            Err(e) => error_text(&e),
        };
        Ok(ResourceContents::text(text, uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resources::service::resource_text;
    use crate::domains::spotify::ApiResponse;
    use crate::domains::spotify::testing::{Harness, devices_body};

    #[tokio::test]
    async fn test_devices_listed() {
        let h = Harness::authorized();
        h.api
            .respond_with(|_| Ok(ApiResponse::new(200, devices_body(&[("a", false), ("b", true)]))));

        let contents = DevicesResource::resolve(DevicesResource::URI, &h.service)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(resource_text(&contents)).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["id"], "b");
        assert_eq!(json[1]["is_active"], true);
        assert_eq!(json[1]["type"], "Computer");
    }

    #[tokio::test]
    async fn test_devices_failure_rendered() {
        let h = Harness::authorized();
        h.api.respond_with(|_| Ok(ApiResponse::new(503, "unavailable")));

        let contents = DevicesResource::resolve(DevicesResource::URI, &h.service)
            .await
            .unwrap();
        assert_eq!(
            resource_text(&contents),
            "error: devices API failed: 503 unavailable"
        );
    }
}
