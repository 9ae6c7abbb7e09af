//! MCP JSON-RPC types
//!
//! Minimal types for the MCP stdio protocol. Only what we need:
//! initialize, tools/list, tools/call and the resources methods.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// JSON-RPC base types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MCP-specific types
// ---------------------------------------------------------------------------

/// Tool definition returned by tools/list
#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters for tools/call
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Entry in resources/list
#[derive(Debug, Serialize)]
pub struct ResourceDefinition {
    pub name: &'static str,
    pub uri: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Entry in resources/templates/list
#[derive(Debug, Serialize)]
pub struct ResourceTemplateDefinition {
    pub name: &'static str,
    #[serde(rename = "uriTemplate")]
    pub uri_template: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

/// Parameters for resources/read
#[derive(Debug, Deserialize)]
pub struct ResourceReadParams {
    pub uri: String,
}

// ---------------------------------------------------------------------------
// JSON-RPC error codes
// ---------------------------------------------------------------------------

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
/// MCP-specific: `resources/read` for a URI nobody serves
pub const RESOURCE_NOT_FOUND: i32 = -32002;
