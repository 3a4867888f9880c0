//! Spotify playback and login tools.

pub mod common;
pub mod login;
pub mod pause;
pub mod play;
pub mod search;

pub use login::{
    SpotifyBeginLoginParams, SpotifyBeginLoginTool, SpotifyCompleteLoginParams,
    SpotifyCompleteLoginTool,
};
pub use pause::{SpotifyPauseParams, SpotifyPauseTool};
pub use play::{SpotifyPlayParams, SpotifyPlayTool};
pub use search::{SpotifySearchParams, SpotifySearchTracksTool};
