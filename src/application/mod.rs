pub mod api;
pub mod fetcher;
pub mod lookup;
pub mod report;
pub mod resolver;

pub use api::ZabbixApi;
pub use fetcher::{FetcherSettings, HistoryFetcher};
pub use lookup::LatestValueLookup;
pub use resolver::{ItemResolver, ResolverSettings};
