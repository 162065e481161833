use crate::config::{ApiConfig, AuthMode};
use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Certificate, Client};
use std::time::Duration;
use tracing::{debug, warn};

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used for API calls.
    ///
    /// - Request timeout from config, connect timeout capped at 10s
    /// - Certificate verification always on; `ca_bundle` only adds roots
    /// - Bearer header when the token travels out of band
    pub fn create_client(config: &ApiConfig) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(MAX_CONNECT_TIMEOUT))
            .user_agent(concat!("zabbix-latest/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &config.ca_bundle {
            let pem = std::fs::read(path)
                .with_context(|| format!("Failed to read CA bundle {}", path.display()))?;
            let certs = Certificate::from_pem_bundle(&pem)
                .with_context(|| format!("Failed to parse CA bundle {}", path.display()))?;
            if certs.is_empty() {
                anyhow::bail!("CA bundle {} contains no certificates", path.display());
            }
            debug!(
                "HttpClientFactory: trusting {} extra root(s) from {}",
                certs.len(),
                path.display()
            );
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        if config.auth_mode == AuthMode::Header {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", config.token))
                .context("ZABBIX_API_TOKEN contains characters not allowed in a header")?;
            value.set_sensitive(true);

            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        if !config.is_tls() {
            warn!(
                "HttpClientFactory: {} is plain http, the API token travels unencrypted",
                config.url
            );
        }

        builder.build().context("Failed to build HTTP client")
    }
}
