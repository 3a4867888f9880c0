//! Resource service implementation.
//!
//! The ResourceService lists the registered resources and reads them by
//! dispatching to the matching definition. Resources are registered via
//! `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::definitions::{AuthStatusResource, DevicesResource, NowPlayingResource};
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::spotify::SpotifyService;

/// Which live view a resource renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    AuthStatus,
    Devices,
    NowPlaying,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// How the content is produced.
    pub kind: ResourceKind,
}

/// Service for listing and reading resources.
pub struct ResourceService {
    spotify: Arc<SpotifyService>,

    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,
}

impl ResourceService {
    pub fn new(spotify: Arc<SpotifyService>) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            spotify,
            resources: BTreeMap::new(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match entry.kind {
            ResourceKind::AuthStatus => AuthStatusResource::resolve(uri, &self.spotify).await?,
            ResourceKind::Devices => DevicesResource::resolve(uri, &self.spotify).await?,
            ResourceKind::NowPlaying => NowPlayingResource::resolve(uri, &self.spotify).await?,
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }
}

/// Text of a text resource.
#[cfg(test)]
pub(crate) fn resource_text(contents: &ResourceContents) -> &str {
    match contents {
        ResourceContents::TextResourceContents { text, .. } => text,
        _ => panic!("Expected text contents"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::spotify::testing::Harness;

    #[tokio::test]
    async fn test_resource_service_lists_all() {
        let h = Harness::unauthenticated();
        let service = ResourceService::new(h.service.clone());

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 3);
    }

    #[tokio::test]
    async fn test_read_existing_resource() {
        let h = Harness::unauthenticated();
        let service = ResourceService::new(h.service.clone());

        let result = service.read_resource("spotify://auth/status").await.unwrap();
        assert_eq!(result.contents.len(), 1);
        assert_eq!(resource_text(&result.contents[0]), "missing");
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let h = Harness::unauthenticated();
        let service = ResourceService::new(h.service.clone());

        let result = service.read_resource("spotify://playlists").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
