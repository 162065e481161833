use crate::domain::errors::LookupError;
use crate::domain::rpc::{RpcRequest, RpcResponse};
use async_trait::async_trait;

/// Delivers one JSON-RPC request and returns the decoded response envelope.
///
/// Implementations report network and HTTP failures as transport-class errors
/// and undecodable bodies as `LookupError::Protocol`. Envelope semantics
/// (error objects, id correlation) are left to the caller.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, LookupError>;
}
