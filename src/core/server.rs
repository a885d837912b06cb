//! MCP server implementation: the request dispatcher.
//!
//! [`McpServer::handle_request`] takes one decoded request envelope, routes
//! it by method name, and produces exactly one response envelope. Transports
//! feed it decoded lines; decode failures are a transport concern and never
//! reach this module.
//!
//! The registry is built before the transport starts and shared read-only
//! afterwards, so the dispatcher is cheap to clone across connections.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use super::config::Config;
use super::protocol::{JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND};
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server name as reported in logs.
    name: String,

    /// Server version.
    version: String,

    /// Registered tools; read-only for the lifetime of the server.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server from a populated registry.
    pub fn new(config: &Config, registry: ToolRegistry) -> Self {
        Self {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            registry: Arc::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one decoded request envelope and produce its response.
    ///
    /// Assumes the value was already decoded from the wire, but still
    /// defends against missing or malformed `method`/`params` fields by
    /// answering with a method-not-found error rather than failing.
    pub fn handle_request(&self, request: Value) -> JsonRpcResponse {
        // Pull the id out of the raw value first: even an envelope that
        // fails deserialization gets its response correlated.
        let id = request.get("id").cloned().filter(|v| !v.is_null());

        let request: JsonRpcRequest = match serde_json::from_value(request) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed request envelope: {}", e);
                return JsonRpcResponse::error(id, METHOD_NOT_FOUND, "Method not found");
            }
        };

        debug!("Dispatching method: {}", request.method);

        match request.method.as_str() {
            "tool/list" => self.handle_tool_list(request.id),
            "tool/call" => self.handle_tool_call(request.id, request.params),
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(request.id, method)
            }
        }
    }

    /// Enumerate all registered tools. Always succeeds; an empty registry
    /// yields an empty list.
    fn handle_tool_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .registry
            .tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.schema(),
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Look up the named tool and invoke it with the given arguments.
    fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = params.unwrap_or_else(|| json!({}));

        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, METHOD_NOT_FOUND, "Missing tool name in params");
        };

        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        let Some(tool) = self.registry.get(name) else {
            return JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Tool {name} not found"));
        };

        info!("Calling tool: {}", name);

        match tool.invoke(&arguments) {
            Ok(value) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": render_text(&value),
                        "annotations": {"audience": ["assistant"]},
                    }]
                }),
            ),
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                JsonRpcResponse::internal_error(id, e.to_string())
            }
        }
    }
}

/// Stringify a tool's return value: strings render raw, everything else as
/// its JSON text.
fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::{INTERNAL_ERROR, METHOD_NOT_FOUND};
    use crate::domains::tools::{InputSchema, ToolError};

    fn add_server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(
            "add",
            "Add two integers",
            InputSchema::builder()
                .required("a", "int")
                .required("b", "int")
                .build(),
            |args| {
                let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(json!(a + b))
            },
        );
        registry.register(
            "fail",
            "Always fails",
            InputSchema::builder().build(),
            |_| Err(ToolError::execution_failed("it broke")),
        );
        McpServer::new(&Config::default(), registry)
    }

    #[test]
    fn test_tool_call_success() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tool/call",
            "params": {"name": "add", "arguments": {"a": 2, "b": 3}},
        }));

        assert_eq!(response.id, Some(json!(1)));
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "5");
        assert_eq!(result["content"][0]["annotations"]["audience"][0], "assistant");
    }

    #[test]
    fn test_tool_call_missing_tool() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tool/call",
            "params": {"name": "missing"},
        }));

        assert_eq!(response.id, Some(json!(2)));
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Tool missing not found");
    }

    #[test]
    fn test_tool_call_handler_failure() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tool/call",
            "params": {"name": "fail"},
        }));

        let error = response.error.unwrap();
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.message, "it broke");
        assert!(response.result.is_none());
    }

    #[test]
    fn test_tool_call_string_result_renders_raw() {
        let mut registry = ToolRegistry::new();
        registry.register("whoami", "", InputSchema::builder().build(), |_| {
            Ok(json!("output/test.csv"))
        });
        let server = McpServer::new(&Config::default(), registry);

        let response = server.handle_request(json!({
            "id": 4, "method": "tool/call", "params": {"name": "whoami"},
        }));
        let result = response.result.unwrap();
        // No surrounding JSON quotes on string results.
        assert_eq!(result["content"][0]["text"], "output/test.csv");
    }

    #[test]
    fn test_tool_list_entries_and_required() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": "2.0", "id": 5, "method": "tool/list", "params": {},
        }));

        assert_eq!(response.id, Some(json!(5)));
        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);

        let add = tools.iter().find(|t| t["name"] == "add").unwrap();
        assert_eq!(add["description"], "Add two integers");
        assert_eq!(add["inputSchema"]["type"], "object");
        assert_eq!(add["inputSchema"]["required"], json!(["a", "b"]));
        assert_eq!(add["inputSchema"]["properties"]["a"]["type"], "int");
    }

    #[test]
    fn test_tool_list_empty_registry() {
        let server = McpServer::new(&Config::default(), ToolRegistry::new());
        let response = server.handle_request(json!({"id": 6, "method": "tool/list"}));
        assert_eq!(response.result.unwrap()["tools"], json!([]));
    }

    #[test]
    fn test_tool_list_is_idempotent() {
        let server = add_server();
        let request = json!({"id": 7, "method": "tool/list"});
        let a = serde_json::to_string(&server.handle_request(request.clone())).unwrap();
        let b = serde_json::to_string(&server.handle_request(request)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_method() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": "2.0", "id": 8, "method": "resource/list", "params": {},
        }));

        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("resource/list"));
        assert_eq!(response.id, Some(json!(8)));
    }

    #[test]
    fn test_missing_method_field() {
        let server = add_server();
        let response = server.handle_request(json!({"id": 9}));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[test]
    fn test_malformed_method_type_echoes_id() {
        let server = add_server();
        let response = server.handle_request(json!({"id": 10, "method": 42}));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
        // The id is extractable even though the envelope is malformed, so
        // the response must carry it.
        assert_eq!(response.id, Some(json!(10)));
    }

    #[test]
    fn test_malformed_jsonrpc_type_echoes_id() {
        let server = add_server();
        let response = server.handle_request(json!({
            "jsonrpc": 2.0, "id": 11, "method": "tool/list",
        }));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!(11)));
    }

    #[test]
    fn test_tool_call_missing_name() {
        let server = add_server();
        let response = server.handle_request(json!({
            "id": 11, "method": "tool/call", "params": {"arguments": {}},
        }));
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("tool name"));
    }

    #[test]
    fn test_tool_call_defaults_arguments_to_empty() {
        let server = add_server();
        let response = server.handle_request(json!({
            "id": 12, "method": "tool/call", "params": {"name": "add"},
        }));
        // Handler sees an empty argument map and still runs.
        assert_eq!(response.result.unwrap()["content"][0]["text"], "0");
    }

    #[test]
    fn test_response_id_echoes_request_id() {
        let server = add_server();
        for id in [json!(1), json!(99)] {
            let response = server.handle_request(json!({
                "id": id.clone(), "method": "tool/list",
            }));
            assert_eq!(response.id, Some(id));
        }

        // A null id deserializes as absent and stays absent on the way out.
        let response = server.handle_request(json!({"id": null, "method": "tool/list"}));
        assert_eq!(response.id, None);
    }
}
