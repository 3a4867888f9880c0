//! Playback devices and their short-lived cache.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::client::{ApiRequest, SpotifyApi};
use super::clock::Clock;
use super::error::{SpotifyError, SpotifyResult, UpstreamError};

/// Default time a device list stays fresh.
pub const DEFAULT_DEVICE_TTL_SECS: i64 = 10;

/// Upper bound on the device list TTL. Keeps the epoch marker used by
/// [`DeviceCache::invalidate`] older than any TTL window.
pub const MAX_DEVICE_TTL_SECS: i64 = 24 * 60 * 60;

/// Device list TTL for a configured number of seconds, clamped to
/// `0..=MAX_DEVICE_TTL_SECS`.
pub fn device_ttl(secs: i64) -> Duration {
    Duration::try_seconds(secs.clamp(0, MAX_DEVICE_TTL_SECS))
        .unwrap_or_else(|| Duration::seconds(DEFAULT_DEVICE_TTL_SECS))
}

const DEVICES_PATH: &str = "/me/player/devices";

/// A Spotify Connect device able to play audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub volume_percent: Option<u32>,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// Device entry as returned by `GET /me/player/devices`.
#[derive(Debug, Deserialize)]
struct RawDevice {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    volume_percent: Option<u32>,
    #[serde(default, rename = "type")]
    device_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DevicesPayload {
    #[serde(default)]
    devices: Option<Vec<RawDevice>>,
}

impl RawDevice {
    /// Records without an identifier cannot be targeted and are dropped.
    fn into_record(self) -> Option<DeviceRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(DeviceRecord {
            id,
            name: self.name.unwrap_or_else(|| "Unknown".to_string()),
            is_active: self.is_active.unwrap_or(false),
            volume_percent: self.volume_percent,
            device_type: self.device_type.unwrap_or_else(|| "Unknown".to_string()),
        })
    }
}

/// Parse a device-list body, keeping API order.
pub fn parse_devices(body: &str) -> Result<Vec<DeviceRecord>, serde_json::Error> {
    let payload: DevicesPayload = serde_json::from_str(body)?;
    Ok(payload
        .devices
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawDevice::into_record)
        .collect())
}

/// Point-in-time copy of the device list.
#[derive(Debug, Clone)]
pub struct DeviceSnapshot {
    pub devices: Vec<DeviceRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    /// A snapshot older than any TTL.
    fn expired() -> Self {
        Self {
            devices: Vec::new(),
            fetched_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at <= ttl
    }
}

/// Time-bounded cache of the device list.
///
/// The snapshot lock is held across a refill, so concurrent callers that find
/// the snapshot expired wait for one fetch instead of issuing their own.
pub struct DeviceCache {
    api: Arc<dyn SpotifyApi>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    snapshot: Mutex<DeviceSnapshot>,
}

impl DeviceCache {
    pub fn new(api: Arc<dyn SpotifyApi>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            api,
            clock,
            ttl,
            snapshot: Mutex::new(DeviceSnapshot::expired()),
        }
    }

    /// The current device list, refetched when older than the TTL.
    ///
    /// On failure the previous snapshot is left as it was.
    #[instrument(skip(self))]
    pub async fn get_devices(&self) -> SpotifyResult<Vec<DeviceRecord>> {
        let mut snapshot = self.snapshot.lock().await;

        if snapshot.is_fresh(self.clock.now(), self.ttl) {
            debug!("Serving {} cached device(s)", snapshot.devices.len());
            return Ok(snapshot.devices.clone());
        }

        let response = self
            .api
            .send(ApiRequest::get(DEVICES_PATH))
            .await
            .map_err(|e| match e {
                SpotifyError::Upstream(upstream) => SpotifyError::DeviceFetchFailed(upstream),
                other => other,
            })?;

        if !response.is_success() {
            warn!("Device listing failed with status {}", response.status);
            return Err(SpotifyError::DeviceFetchFailed(response.into_error()));
        }

        let devices = parse_devices(&response.body).map_err(|e| {
            SpotifyError::DeviceFetchFailed(UpstreamError::invalid_response(e.to_string()))
        })?;

        *snapshot = DeviceSnapshot {
            devices: devices.clone(),
            fetched_at: self.clock.now(),
        };
        debug!("Device cache refilled with {} device(s)", devices.len());
        Ok(devices)
    }

    /// Force the next [`get_devices`](Self::get_devices) to refetch.
    pub async fn invalidate(&self) {
        self.snapshot.lock().await.fetched_at = DateTime::<Utc>::UNIX_EPOCH;
    }

    /// Look up one device, applying the same refill policy.
    pub async fn get_by_id(&self, id: &str) -> SpotifyResult<Option<DeviceRecord>> {
        Ok(self.get_devices().await?.into_iter().find(|d| d.id == id))
    }
}
