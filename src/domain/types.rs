use crate::domain::errors::QueryError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One latest-value lookup: the item key plus an optional host filter.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    key: String,
    host: Option<String>,
}

impl Query {
    /// Builds a query. The key must contain something other than whitespace;
    /// a blank host is treated as no host filter at all.
    pub fn new(key: impl Into<String>, host: Option<String>) -> Result<Self, QueryError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(QueryError::EmptyKey);
        }

        let host = host.filter(|h| !h.trim().is_empty());
        Ok(Self { key, host })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "'{}' on host '{}'", self.key, host),
            None => write!(f, "'{}'", self.key),
        }
    }
}

/// Opaque item identifier handed out by the monitoring server.
///
/// Zabbix sends ids as JSON strings; numbers are accepted too and kept as
/// their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Ok(ItemId(s)),
            Raw::Number(n) => Ok(ItemId(n.to_string())),
        }
    }
}

/// The latest recorded value of an item, kept as the server's raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecord {
    pub value: String,
}

impl ValueRecord {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl fmt::Display for ValueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Zabbix history value type, sent as the `history` parameter of `history.get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryType {
    Float,
    Character,
    Log,
    Unsigned,
    Text,
}

impl HistoryType {
    /// Numeric code understood by the API.
    pub fn code(self) -> u8 {
        match self {
            HistoryType::Float => 0,
            HistoryType::Character => 1,
            HistoryType::Log => 2,
            HistoryType::Unsigned => 3,
            HistoryType::Text => 4,
        }
    }
}

impl FromStr for HistoryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "float" => Ok(HistoryType::Float),
            "1" | "character" | "char" => Ok(HistoryType::Character),
            "2" | "log" => Ok(HistoryType::Log),
            "3" | "unsigned" | "uint" => Ok(HistoryType::Unsigned),
            "4" | "text" => Ok(HistoryType::Text),
            _ => anyhow::bail!(
                "Invalid history type: {}. Must be float, character, log, unsigned, text or 0-4",
                s
            ),
        }
    }
}

impl fmt::Display for HistoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HistoryType::Float => "float",
            HistoryType::Character => "character",
            HistoryType::Log => "log",
            HistoryType::Unsigned => "unsigned",
            HistoryType::Text => "text",
        };
        f.write_str(name)
    }
}
