use crate::application::api::ZabbixApi;
use crate::application::fetcher::{FetcherSettings, HistoryFetcher};
use crate::application::resolver::{ItemResolver, ResolverSettings};
use crate::config::Config;
use crate::domain::outcome::{Latest, LookupOutcome, Resolution};
use crate::domain::ports::RpcTransport;
use crate::domain::types::Query;
use std::sync::Arc;
use tracing::info;

/// Resolve-then-fetch for a single query.
pub struct LatestValueLookup {
    resolver: ItemResolver,
    fetcher: HistoryFetcher,
}

impl LatestValueLookup {
    pub fn new(resolver: ItemResolver, fetcher: HistoryFetcher) -> Self {
        Self { resolver, fetcher }
    }

    /// Wires a resolver and a fetcher sharing one API session over `transport`.
    pub fn from_config(config: &Config, transport: Arc<dyn RpcTransport>) -> Self {
        let api = Arc::new(ZabbixApi::from_config(transport, &config.api));

        let resolver = ItemResolver::new(
            api.clone(),
            ResolverSettings {
                strict_match: config.query.strict_match,
            },
        );
        let fetcher = HistoryFetcher::new(
            api,
            FetcherSettings {
                history_type: config.query.history_type,
            },
        );

        Self::new(resolver, fetcher)
    }

    /// The history request is only sent once resolution has produced an id.
    pub async fn run(&self, query: &Query) -> LookupOutcome {
        let item_id = match self.resolver.resolve(query).await {
            Ok(Resolution::Found(item_id)) => item_id,
            Ok(Resolution::NotFound) => return LookupOutcome::NotFound(query.clone()),
            Err(e) => return LookupOutcome::Failed(e),
        };

        info!("Lookup: {} resolved to item {}", query, item_id);

        match self.fetcher.latest(&item_id).await {
            Ok(Latest::Value(record)) => LookupOutcome::Success(record),
            Ok(Latest::NoData) => LookupOutcome::NoData(item_id),
            Err(e) => LookupOutcome::Failed(e),
        }
    }
}
