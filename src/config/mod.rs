//! Configuration module for zabbix-latest.
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file by the binary), split by area: API connection and lookup target.
//! Command-line flags are applied on top by the binary.

mod api_config;
mod query_config;

pub use api_config::{ApiConfig, AuthMode, DEFAULT_TIMEOUT_SECS};
pub use query_config::QueryConfig;

use crate::domain::types::{HistoryType, Query};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Variable lookup used by the loaders; `env::var` in production.
pub type Vars<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Command-line values layered over the environment. Set fields win.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub key: Option<String>,
    pub host: Option<String>,
    pub history_type: Option<String>,
    pub strict: bool,
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&|key| env::var(key).ok())
    }

    pub fn from_vars(vars: Vars<'_>) -> Result<Self> {
        let api = ApiConfig::from_vars(vars).context("Failed to load API config")?;
        let query = QueryConfig::from_vars(vars).context("Failed to load query config")?;
        Ok(Self { api, query })
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) -> Result<()> {
        if let Some(key) = &overrides.key {
            self.query.key = Some(key.clone());
        }
        if let Some(host) = &overrides.host {
            self.query.host = Some(host.clone());
        }
        if let Some(raw) = &overrides.history_type {
            let history_type = HistoryType::from_str(raw).context("Invalid --history-type")?;
            self.query.history_type = Some(history_type);
        }
        if overrides.strict {
            self.query.strict_match = true;
        }
        Ok(())
    }

    /// Build the lookup query. Fails when no key was configured.
    pub fn to_query(&self) -> Result<Query> {
        let key = self
            .query
            .key
            .clone()
            .context("No item key given: set ZABBIX_KEY or pass --key")?;
        Query::new(key, self.query.host.clone()).context("Invalid item key")
    }
}

fn required(vars: Vars<'_>, key: &str) -> Result<String> {
    match vars(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("{} is not set", key),
    }
}

fn parse_u64(vars: Vars<'_>, key: &str, default: u64) -> Result<u64> {
    vars(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .context(format!("Failed to parse {}", key))
}

fn parse_bool(vars: Vars<'_>, key: &str, default: bool) -> Result<bool> {
    vars(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .to_lowercase()
        .parse::<bool>()
        .context(format!("Failed to parse {}", key))
}
