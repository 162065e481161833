//! Latest value retrieval via `history.get`.

use crate::application::api::{ZabbixApi, json_kind};
use crate::domain::errors::LookupError;
use crate::domain::outcome::Latest;
use crate::domain::types::{HistoryType, ItemId, ValueRecord};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetcherSettings {
    /// Sent as `history`; omitted when `None` so the server default applies.
    pub history_type: Option<HistoryType>,
}

pub struct HistoryFetcher {
    api: Arc<ZabbixApi>,
    settings: FetcherSettings,
}

impl HistoryFetcher {
    pub fn new(api: Arc<ZabbixApi>, settings: FetcherSettings) -> Self {
        Self { api, settings }
    }

    /// Fetches the most recent value recorded for `item_id`.
    pub async fn latest(&self, item_id: &ItemId) -> Result<Latest, LookupError> {
        let params = history_get_params(item_id, self.settings.history_type);
        let rows = self.api.call("history.get", params).await?;

        if rows.is_empty() {
            debug!("HistoryFetcher: item {} has no history", item_id);
            return Ok(Latest::NoData);
        }

        let newest = newest_row(&rows);
        let value = row_value(newest)?;

        debug!("HistoryFetcher: item {} latest value {}", item_id, value);
        Ok(Latest::Value(ValueRecord::new(value)))
    }
}

pub(crate) fn history_get_params(
    item_id: &ItemId,
    history_type: Option<HistoryType>,
) -> serde_json::Value {
    let mut params = json!({
        "output": ["value"],
        "itemids": item_id,
        "sortfield": "clock",
        "sortorder": "DESC",
        "limit": 1,
    });

    if let Some(history_type) = history_type {
        params["history"] = json!(history_type.code());
    }

    params
}

/// The row with the greatest `clock`, or the first row when any row lacks
/// one. Ties keep server order.
fn newest_row(rows: &[serde_json::Value]) -> &serde_json::Value {
    let clocks: Option<Vec<i64>> = rows.iter().map(row_clock).collect();
    let Some(clocks) = clocks else {
        return &rows[0];
    };

    let mut best = 0;
    for (index, clock) in clocks.iter().enumerate().skip(1) {
        if *clock > clocks[best] {
            best = index;
        }
    }
    &rows[best]
}

fn row_clock(row: &serde_json::Value) -> Option<i64> {
    match row.get("clock")? {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn row_value(row: &serde_json::Value) -> Result<String, LookupError> {
    match row.get("value") {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Null) | None => Err(LookupError::protocol(
            "history.get row has no value",
        )),
        Some(other @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Ok(other.to_string())
        }
        Some(other) => Err(LookupError::protocol(format!(
            "history.get value is {}",
            json_kind(other)
        ))),
    }
}
