//! Key to item id resolution via `item.get`.

use crate::application::api::ZabbixApi;
use crate::domain::errors::LookupError;
use crate::domain::outcome::Resolution;
use crate::domain::types::{ItemId, Query};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverSettings {
    /// Fail with `AmbiguousMatch` instead of taking the first of several items.
    pub strict_match: bool,
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    itemid: ItemId,
}

pub struct ItemResolver {
    api: Arc<ZabbixApi>,
    settings: ResolverSettings,
}

impl ItemResolver {
    pub fn new(api: Arc<ZabbixApi>, settings: ResolverSettings) -> Self {
        Self { api, settings }
    }

    /// Resolves `query` to one item id.
    ///
    /// The key goes out as `search.key_`, which Zabbix matches as a substring:
    /// `system.cpu.util` also matches `system.cpu.util[,idle]`. When several
    /// items match, the first one in server order wins, which is not
    /// necessarily the exact key. Use strict matching (`--strict`) to fail
    /// on such keys instead.
    pub async fn resolve(&self, query: &Query) -> Result<Resolution, LookupError> {
        let rows = self.api.call("item.get", item_get_params(query)).await?;

        let Some(first) = rows.first() else {
            debug!("ItemResolver: no item matches {}", query);
            return Ok(Resolution::NotFound);
        };

        if rows.len() > 1 {
            if self.settings.strict_match {
                return Err(LookupError::AmbiguousMatch {
                    key: query.key().to_string(),
                    host: query.host().map(str::to_string),
                    count: rows.len(),
                });
            }
            warn!(
                "ItemResolver: {} items match {}, using the first one returned",
                rows.len(),
                query
            );
        }

        let row: ItemRow = serde_json::from_value(first.clone())
            .map_err(|e| LookupError::protocol(format!("malformed item.get row: {}", e)))?;

        debug!("ItemResolver: {} -> item {}", query, row.itemid);
        Ok(Resolution::Found(row.itemid))
    }
}

pub(crate) fn item_get_params(query: &Query) -> serde_json::Value {
    let filter = match query.host() {
        Some(host) => json!({ "host": [host] }),
        None => json!({}),
    };

    json!({
        "output": ["itemid"],
        "search": { "key_": query.key() },
        "filter": filter,
    })
}
