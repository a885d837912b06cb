//! JSON-RPC 2.0 envelope types.
//!
//! One encoded object per line in each direction. The request side is
//! deliberately lenient: every field has a serde default so a structurally
//! odd envelope degrades to the method-not-found path instead of failing
//! deserialization outright.

use serde::{Deserialize, Serialize};

/// The JSON-RPC protocol version carried on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Input line could not be decoded into a structured envelope.
pub const PARSE_ERROR: i32 = -32700;

/// Unknown RPC method, or unknown tool name in `tool/call`.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// A failure raised while invoking a tool handler.
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
///
/// Exactly one of `result` / `error` is set; the constructors below are the
/// only way responses are built, which keeps that invariant in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Parse error response. No `id` could be extracted from the line, so
    /// the response carries none.
    pub fn parse_error() -> Self {
        Self::error(None, PARSE_ERROR, "Parse error")
    }

    /// Method not found error, naming the unknown method.
    pub fn method_not_found(id: Option<serde_json::Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Internal error during request handling.
    pub fn internal_error(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_and_error_mutually_exclusive() {
        let ok = JsonRpcResponse::success(Some(json!(1)), json!({"tools": []}));
        assert!(ok.result.is_some());
        assert!(ok.error.is_none());

        let err = JsonRpcResponse::error(Some(json!(1)), INTERNAL_ERROR, "boom");
        assert!(err.result.is_none());
        assert!(err.error.is_some());
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let ok = JsonRpcResponse::success(Some(json!(7)), json!({}));
        let encoded = serde_json::to_value(&ok).unwrap();
        assert_eq!(encoded["jsonrpc"], "2.0");
        assert_eq!(encoded["id"], 7);
        assert!(encoded.get("error").is_none());

        let err = JsonRpcResponse::parse_error();
        let encoded = serde_json::to_value(&err).unwrap();
        assert!(encoded.get("id").is_none());
        assert!(encoded.get("result").is_none());
        assert_eq!(encoded["error"]["code"], -32700);
        assert_eq!(encoded["error"]["message"], "Parse error");
    }

    #[test]
    fn test_request_tolerates_missing_fields() {
        let request: JsonRpcRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.method, "");
        assert!(request.id.is_none());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_method_not_found_names_method() {
        let response = JsonRpcResponse::method_not_found(Some(json!(3)), "bogus/method");
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("bogus/method"));
    }
}
