//! Picks the device a playback command should target.

use std::sync::Arc;
use tracing::debug;

use super::devices::{DeviceCache, DeviceRecord};
use super::error::SpotifyResult;

/// The active device if there is one, else the first device in API order.
pub fn select_target(devices: &[DeviceRecord]) -> Option<&DeviceRecord> {
    devices
        .iter()
        .find(|d| d.is_active)
        .or_else(|| devices.first())
}

/// Resolves the target device for play/pause.
#[derive(Clone)]
pub struct DeviceResolver {
    cache: Arc<DeviceCache>,
}

impl DeviceResolver {
    pub fn new(cache: Arc<DeviceCache>) -> Self {
        Self { cache }
    }

    /// An explicit id wins without validation; Spotify rejects unknown ids
    /// itself. Otherwise the cached device list decides, and `None` means no
    /// device is available.
    pub async fn resolve_target(&self, explicit_device_id: Option<&str>) -> SpotifyResult<Option<String>> {
        if let Some(id) = explicit_device_id {
            return Ok(Some(id.to_string()));
        }

        let devices = self.cache.get_devices().await?;
        let target = select_target(&devices).map(|d| d.id.clone());
        debug!("Resolved target device: {:?}", target);
        Ok(target)
    }
}
