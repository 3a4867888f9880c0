//! Tools domain module.
//!
//! Tools are the commands MCP clients can invoke: playback control, track
//! search, the login flow and a ping.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder
//! - `registry.rs` - Tool names and metadata
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()`,
//!    `to_tool()` and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its metadata in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
