//! Zabbix JSON-RPC session.
//!
//! Builds request envelopes (ids, `auth` member) on top of an `RpcTransport`
//! and turns response envelopes into either a result array or a `LookupError`.

use crate::config::{ApiConfig, AuthMode};
use crate::domain::errors::LookupError;
use crate::domain::ports::RpcTransport;
use crate::domain::rpc::{JSONRPC_VERSION, RpcRequest, RpcResponse};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub struct ZabbixApi {
    transport: Arc<dyn RpcTransport>,
    body_token: Option<String>,
    next_id: AtomicU64,
}

impl ZabbixApi {
    /// `body_token` is copied into every envelope's `auth` member when set.
    pub fn new(transport: Arc<dyn RpcTransport>, body_token: Option<String>) -> Self {
        Self {
            transport,
            body_token,
            next_id: AtomicU64::new(1),
        }
    }

    /// In header mode the token is already on the HTTP client, so the
    /// envelope carries none.
    pub fn from_config(transport: Arc<dyn RpcTransport>, config: &ApiConfig) -> Self {
        let body_token = match config.auth_mode {
            AuthMode::Body => Some(config.token.clone()),
            AuthMode::Header => None,
        };
        Self::new(transport, body_token)
    }

    /// Issues one call and returns the `result` array.
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, LookupError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut request = RpcRequest::new(method, params, id);
        if let Some(token) = &self.body_token {
            request = request.with_auth(token.clone());
        }

        debug!("ZabbixApi: -> {} (id {})", method, id);
        let response = self.transport.send(&request).await?;
        let items = Self::unwrap_result(id, response)?;
        debug!("ZabbixApi: <- {} (id {}): {} rows", method, id, items.len());

        Ok(items)
    }

    fn unwrap_result(
        id: u64,
        response: RpcResponse,
    ) -> Result<Vec<serde_json::Value>, LookupError> {
        if let Some(version) = &response.jsonrpc
            && version != JSONRPC_VERSION
        {
            return Err(LookupError::protocol(format!(
                "unsupported jsonrpc version '{}'",
                version
            )));
        }

        if let Some(response_id) = &response.id
            && !response_id.is_null()
            && !id_matches(response_id, id)
        {
            return Err(LookupError::protocol(format!(
                "response id {} does not match request id {}",
                response_id, id
            )));
        }

        if let Some(error) = response.error {
            return Err(LookupError::Api {
                code: error.code,
                data: error.data_text(),
                message: error.message,
            });
        }

        match response.result {
            Some(serde_json::Value::Array(items)) => Ok(items),
            Some(other) => Err(LookupError::protocol(format!(
                "expected a result array, got {}",
                json_kind(&other)
            ))),
            None => Err(LookupError::protocol(
                "response has neither result nor error",
            )),
        }
    }
}

fn id_matches(response_id: &serde_json::Value, id: u64) -> bool {
    match response_id {
        serde_json::Value::Number(n) => n.as_u64() == Some(id),
        serde_json::Value::String(s) => s.parse::<u64>().ok() == Some(id),
        _ => false,
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
