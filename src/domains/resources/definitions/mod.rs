//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and an
//! async `resolve()` that renders the current state as text.

pub mod auth_status;
pub mod devices;
pub mod now_playing;

pub use auth_status::AuthStatusResource;
pub use devices::DevicesResource;
pub use now_playing::NowPlayingResource;

use crate::domains::spotify::SpotifyError;

use super::service::ResourceKind;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Which resolver serves this resource.
    fn kind() -> ResourceKind;
}

/// Text shown in place of a resource whose Spotify call failed.
pub(crate) fn error_text(err: &SpotifyError) -> String {
    format!("error: {}", err)
}
