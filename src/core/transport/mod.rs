//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output, the transport MCP hosts
//! launch local servers with. Logs go to stderr so they never mix with
//! protocol traffic on stdout.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
