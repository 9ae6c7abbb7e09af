//! MCP stdio server
//!
//! Reads JSON-RPC requests line by line, dispatches them to the
//! invocation pipeline or the resource registry, and writes one response
//! line per request, in request order. No async runtime; each request is
//! handled to completion before the next line is read.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::config::mcp::PROTOCOL_VERSION;
use crate::pipeline::Pipeline;
use crate::resource::ResourceRegistry;

use super::types::{
    JsonRpcRequest, JsonRpcResponse, ResourceDefinition, ResourceReadParams,
    ResourceTemplateDefinition, ToolCallParams, ToolDefinition, INVALID_PARAMS, METHOD_NOT_FOUND,
    PARSE_ERROR, RESOURCE_NOT_FOUND,
};

/// One service instance: identity, tools and resources
#[derive(Debug)]
pub struct McpServer {
    name: &'static str,
    version: &'static str,
    pipeline: Pipeline,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(name: &'static str, version: &'static str, pipeline: Pipeline) -> Self {
        Self {
            name,
            version,
            pipeline,
            resources: ResourceRegistry::new(),
        }
    }

    pub fn with_resources(mut self, resources: ResourceRegistry) -> Self {
        self.resources = resources;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Serve on stdin/stdout until stdin closes
    pub fn run_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve line-delimited JSON-RPC from `reader`, replying on `writer`
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle_request(&request),
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable request");
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, e.to_string()))
                }
            };

            if let Some(response) = response {
                write_response(&mut writer, &response)?;
            }
        }
        tracing::info!(server = self.name, "input closed, shutting down");
        Ok(())
    }

    /// Handle one request. Notifications (no id) get no response.
    pub fn handle_request(&self, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = req.id.clone();
        tracing::debug!(method = %req.method, "request");
        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, &req.params),
            "resources/list" => self.handle_resources_list(id),
            "resources/templates/list" => self.handle_resource_templates_list(id),
            "resources/read" => self.handle_resources_read(id, &req.params),
            method if method.starts_with("notifications/") => return None,
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", req.method),
            ),
        };
        response.id.is_some().then_some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": self.name,
                    "version": self.version
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tool_defs: Vec<ToolDefinition> = self
            .pipeline
            .registry()
            .iter()
            .map(|c| ToolDefinition {
                name: c.name,
                description: c.description,
                input_schema: c.input_shape.json_schema(),
            })
            .collect();
        JsonRpcResponse::success(id, json!({ "tools": tool_defs }))
    }

    fn handle_tools_call(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let call_params: ToolCallParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string());
            }
        };

        let result = self.pipeline.invoke(&call_params.name, &call_params.arguments);

        JsonRpcResponse::success(
            id,
            serde_json::to_value(result).unwrap_or_else(|_| json!({"error": "serialization failed"})),
        )
    }

    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let defs: Vec<ResourceDefinition> = self
            .resources
            .statics()
            .map(|r| ResourceDefinition {
                name: r.name,
                uri: r.uri_template,
                mime_type: r.mime_type,
            })
            .collect();
        JsonRpcResponse::success(id, json!({ "resources": defs }))
    }

    fn handle_resource_templates_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let defs: Vec<ResourceTemplateDefinition> = self
            .resources
            .templates()
            .map(|r| ResourceTemplateDefinition {
                name: r.name,
                uri_template: r.uri_template,
                mime_type: r.mime_type,
            })
            .collect();
        JsonRpcResponse::success(id, json!({ "resourceTemplates": defs }))
    }

    fn handle_resources_read(&self, id: Option<Value>, params: &Value) -> JsonRpcResponse {
        let read_params: ResourceReadParams = match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string());
            }
        };

        match self.resources.read(&read_params.uri) {
            Some(contents) => JsonRpcResponse::success(id, json!({ "contents": [contents] })),
            None => JsonRpcResponse::error(
                id,
                RESOURCE_NOT_FOUND,
                format!("Unknown resource '{}'", read_params.uri),
            ),
        }
    }
}

fn write_response<W: Write>(out: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}
