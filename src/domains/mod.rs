//! Domains module containing business logic organized by bounded contexts.
//!
//! `spotify` holds the playback and authorization logic; `tools` and
//! `resources` expose it over MCP.

pub mod resources;
pub mod spotify;
pub mod tools;
