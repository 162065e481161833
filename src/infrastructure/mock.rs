use crate::domain::errors::LookupError;
use crate::domain::ports::RpcTransport;
use crate::domain::rpc::{RpcErrorObject, RpcRequest, RpcResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Scripted answer for one JSON-RPC method.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `result` member, echoed with the request id
    Result(serde_json::Value),
    /// `error` member, echoed with the request id
    Error(RpcErrorObject),
    /// Whole response envelope, returned as-is
    Raw(serde_json::Value),
    /// Transport-level failure
    Fail(LookupError),
}

impl MockReply {
    pub fn result(result: serde_json::Value) -> Self {
        MockReply::Result(result)
    }

    pub fn error(code: i64, message: &str, data: Option<&str>) -> Self {
        MockReply::Error(RpcErrorObject {
            code,
            message: message.to_string(),
            data: data.map(|d| serde_json::Value::String(d.to_string())),
        })
    }

    pub fn raw(envelope: serde_json::Value) -> Self {
        MockReply::Raw(envelope)
    }

    pub fn fail(error: LookupError) -> Self {
        MockReply::Fail(error)
    }
}

/// In-memory transport answering from a per-method script and recording
/// every request it receives.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    requests: Mutex<Vec<RpcRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, method: &str, reply: MockReply) -> Self {
        self.replies.insert(method.to_string(), reply);
        self
    }

    /// Every request sent so far, in order.
    pub async fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, LookupError> {
        self.requests.lock().await.push(request.clone());
        debug!("MockTransport: {} (id {})", request.method, request.id);

        match self.replies.get(&request.method) {
            Some(MockReply::Result(result)) => Ok(RpcResponse::success(request.id, result.clone())),
            Some(MockReply::Error(error)) => Ok(RpcResponse::failure(request.id, error.clone())),
            Some(MockReply::Raw(envelope)) => serde_json::from_value(envelope.clone())
                .map_err(|e| LookupError::protocol(format!("invalid scripted envelope: {}", e))),
            Some(MockReply::Fail(error)) => Err(error.clone()),
            None => Ok(RpcResponse::failure(
                request.id,
                RpcErrorObject {
                    code: -32601,
                    message: "Method not found.".to_string(),
                    data: Some(serde_json::Value::String(format!(
                        "No scripted reply for {}",
                        request.method
                    ))),
                },
            )),
        }
    }
}
