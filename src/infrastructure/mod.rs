pub mod core;
pub mod mock;
pub mod zabbix;

pub use self::core::HttpClientFactory;
pub use zabbix::HttpTransport;
