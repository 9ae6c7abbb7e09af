//! Network operations
//!
//! HTTP client used by handlers that call out to an upstream.

pub mod client;

// Re-export commonly used types
pub use client::{HttpClient, JsonSource};
