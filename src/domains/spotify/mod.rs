//! Spotify domain: credentials, device discovery and playback control.
//!
//! Everything here is transport-agnostic. Tools and resources talk to a
//! single [`SpotifyService`], which owns the token manager, the device cache
//! and the Web API client.

pub mod client;
pub mod clock;
pub mod credential;
pub mod devices;
pub mod error;
pub mod playback;
pub mod player;
pub mod resolver;
pub mod search;
pub mod service;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{AccountsClient, ApiRequest, ApiResponse, SpotifyApi, WebApiClient};
pub use clock::{Clock, SystemClock};
pub use credential::{Credential, CredentialStore, FileCredentialStore};
pub use devices::{DeviceCache, DeviceRecord};
pub use error::{SpotifyError, SpotifyResult, UpstreamError};
pub use playback::PlayRequest;
pub use player::NowPlaying;
pub use resolver::DeviceResolver;
pub use search::TrackSummary;
pub use service::{PlayReport, SpotifyService};
pub use token::{AuthStatus, TokenManager};
