//! MCP stdio server
//!
//! Manual implementation of the Model Context Protocol over stdin/stdout.
//! No async runtime; requests are served one at a time on the calling thread.

pub mod server;
pub mod types;

pub use server::McpServer;
