//! Tool definitions module.
//!
//! Each tool is defined in its own file.

pub mod ping;
pub mod spotify;

pub use ping::PingTool;
pub use spotify::{
    SpotifyBeginLoginTool, SpotifyCompleteLoginTool, SpotifyPauseTool, SpotifyPlayTool,
    SpotifySearchTracksTool,
};
