//! API endpoint configuration parsing from environment variables.
//!
//! Covers everything needed to reach the Zabbix frontend: the endpoint URL,
//! the API token and where it travels, the request timeout and an optional
//! extra CA bundle.

use super::{Vars, parse_u64, required};
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Where the API token is placed on each request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// `auth` member of the JSON-RPC envelope
    #[default]
    Body,
    /// `Authorization: Bearer` header, no `auth` member
    Header,
}

impl FromStr for AuthMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(AuthMode::Body),
            "header" | "bearer" => Ok(AuthMode::Header),
            _ => anyhow::bail!("Invalid ZABBIX_AUTH_MODE: {}. Must be 'body' or 'header'", s),
        }
    }
}

/// Zabbix API connection settings
#[derive(Clone)]
pub struct ApiConfig {
    pub url: Url,
    pub token: String,
    pub auth_mode: AuthMode,
    pub timeout: Duration,
    pub ca_bundle: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_vars(vars: Vars<'_>) -> Result<Self> {
        let raw_url = required(vars, "ZABBIX_URL")?;
        let url = Url::parse(raw_url.trim())
            .with_context(|| format!("ZABBIX_URL is not a valid URL: {}", raw_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("ZABBIX_URL must use http or https, got '{}'", url.scheme());
        }

        let token = required(vars, "ZABBIX_API_TOKEN")?;

        let auth_mode = match vars("ZABBIX_AUTH_MODE") {
            Some(raw) => AuthMode::from_str(&raw)?,
            None => AuthMode::default(),
        };

        let timeout_secs = parse_u64(vars, "ZABBIX_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            anyhow::bail!("ZABBIX_TIMEOUT_SECS must be greater than zero");
        }

        let ca_bundle = vars("ZABBIX_CA_BUNDLE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            url,
            token,
            auth_mode,
            timeout: Duration::from_secs(timeout_secs),
            ca_bundle,
        })
    }

    pub fn is_tls(&self) -> bool {
        self.url.scheme() == "https"
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .field("auth_mode", &self.auth_mode)
            .field("timeout", &self.timeout)
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}
