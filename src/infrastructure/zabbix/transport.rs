//! HTTP transport for the Zabbix JSON-RPC endpoint.

use crate::config::ApiConfig;
use crate::domain::errors::LookupError;
use crate::domain::ports::RpcTransport;
use crate::domain::rpc::{RpcRequest, RpcResponse};
use crate::infrastructure::core::HttpClientFactory;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as _;
use url::Url;

const BODY_SNIPPET_LEN: usize = 120;

/// POSTs each envelope to one endpoint, one request at a time.
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = HttpClientFactory::create_client(config)?;
        Ok(Self::new(client, config.url.clone()))
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, LookupError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport_error)?;

        serde_json::from_str(&body).map_err(|e| {
            LookupError::protocol(format!(
                "body is not a JSON-RPC response ({}): {}",
                e,
                snippet(&body)
            ))
        })
    }
}

/// reqwest's top-level message hides the cause (refused, DNS, TLS), so the
/// whole source chain is kept.
fn transport_error(error: reqwest::Error) -> LookupError {
    let mut reason = if error.is_timeout() {
        format!("timed out: {}", error)
    } else {
        error.to_string()
    };

    let mut source = error.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }

    LookupError::transport(reason)
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    match trimmed.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
