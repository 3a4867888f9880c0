//! Resources domain module.
//!
//! Resources are read-only views MCP clients can fetch: authorization
//! status, playback devices and the current playback state.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` implementing `ResourceDefinition`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `registry.rs` and add its `ResourceKind` arm in `service.rs`

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{ResourceEntry, ResourceKind, ResourceService};
