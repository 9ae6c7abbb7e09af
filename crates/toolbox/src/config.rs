//! Configuration constants for the toolbox core

/// Network-related configuration
pub mod network {
    /// User agent for outbound HTTP requests
    pub const USER_AGENT: &str = concat!("Toolbox/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Overall request timeout in seconds.
    /// Outbound calls are never left pending indefinitely.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// MCP protocol configuration
pub mod mcp {
    /// Protocol revision advertised during `initialize`
    pub const PROTOCOL_VERSION: &str = "2024-11-05";
}
