//! Lookup target configuration parsing from environment variables.

use super::{Vars, parse_bool};
use crate::domain::types::HistoryType;
use anyhow::{Context, Result};
use std::str::FromStr;

/// What to look up and how strictly
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    pub key: Option<String>,
    pub host: Option<String>,
    pub history_type: Option<HistoryType>,
    pub strict_match: bool,
}

impl QueryConfig {
    pub fn from_vars(vars: Vars<'_>) -> Result<Self> {
        let history_type = match vars("ZABBIX_HISTORY_TYPE").filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                Some(HistoryType::from_str(&raw).context("Failed to parse ZABBIX_HISTORY_TYPE")?)
            }
            None => None,
        };

        Ok(Self {
            key: vars("ZABBIX_KEY").filter(|k| !k.trim().is_empty()),
            host: vars("ZABBIX_HOST").filter(|h| !h.trim().is_empty()),
            history_type,
            strict_match: parse_bool(vars, "ZABBIX_STRICT_MATCH", false)?,
        })
    }
}
