//! JSON-RPC 2.0 envelope types for the Zabbix API.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request as the Zabbix frontend expects it.
#[derive(Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            auth: None,
            id,
        }
    }

    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }
}

// The token must never reach a log line.
impl fmt::Debug for RpcRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcRequest")
            .field("jsonrpc", &self.jsonrpc)
            .field("method", &self.method)
            .field("params", &self.params)
            .field("auth", &self.auth.as_ref().map(|_| "<redacted>"))
            .field("id", &self.id)
            .finish()
    }
}

/// JSON-RPC 2.0 response. Every member is optional on the wire so that
/// shape problems are reported by the caller instead of failing in serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

impl RpcResponse {
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            result: Some(result),
            error: None,
            id: Some(id.into()),
        }
    }

    pub fn failure(id: u64, error: RpcErrorObject) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            result: None,
            error: Some(error),
            id: Some(id.into()),
        }
    }
}

/// JSON-RPC 2.0 error object. Zabbix puts its human-readable detail in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorObject {
    /// `data` rendered as text: strings verbatim, anything else as JSON.
    pub fn data_text(&self) -> Option<String> {
        match &self.data {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}
