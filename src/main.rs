//! zabbix-latest - print the latest value of a Zabbix item
//!
//! Resolves an item key (optionally restricted to one host) to its item id,
//! then prints the newest value from the item's history.
//!
//! # Usage
//! ```sh
//! ZABBIX_URL=https://zabbix.example.com/zabbix/api_jsonrpc.php \
//! ZABBIX_API_TOKEN=... ZABBIX_KEY='system.cpu.util[,idle]' zabbix-latest
//! ```
//!
//! # Exit codes
//! - `0` value printed
//! - `1` no item matches the key
//! - `2` the item has no history
//! - `3` transport failure (network, TLS, timeout, HTTP status)
//! - `4` protocol failure (malformed reply, API error object)
//! - `5` several items match and `--strict` is set
//! - `6` configuration error
//! - `7` the value could not be written (e.g. closed pipe)
//!
//! # Logging
//! Logs go to stderr. `RUST_LOG` wins when set; otherwise `warn`, or `debug`
//! with `--verbose`.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use zabbix_latest::application::LatestValueLookup;
use zabbix_latest::application::report;
use zabbix_latest::config::{CliOverrides, Config};
use zabbix_latest::domain::outcome::ExitStatus;
use zabbix_latest::domain::ports::RpcTransport;
use zabbix_latest::domain::types::Query;
use zabbix_latest::infrastructure::HttpTransport;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the latest value of a Zabbix item", long_about = None)]
struct Cli {
    /// Item key to look up (overrides ZABBIX_KEY)
    #[arg(short, long)]
    key: Option<String>,

    /// Only consider items on this host (overrides ZABBIX_HOST)
    #[arg(long)]
    host: Option<String>,

    /// History value type: float, character, log, unsigned, text or 0-4
    #[arg(long)]
    history_type: Option<String>,

    /// Fail instead of picking the first item when the key matches several
    #[arg(long)]
    strict: bool,

    /// Debug logging on stderr (RUST_LOG still takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            key: self.key.clone(),
            host: self.host.clone(),
            history_type: self.history_type.clone(),
            strict: self.strict,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, query, transport) = match setup(&cli) {
        Ok(parts) => parts,
        Err(e) => return finish(report::render_config_error(&e, &mut io::stderr().lock())),
    };
    debug!("Configuration loaded: {:?}", config);

    let lookup = LatestValueLookup::from_config(&config, transport);
    let outcome = lookup.run(&query).await;

    let mut stdout = io::stdout().lock();
    let status = report::render(&outcome, &mut stdout, &mut io::stderr().lock());
    let flushed = stdout.flush();
    finish(status.and_then(|s| flushed.map(|_| s)))
}

fn setup(cli: &Cli) -> Result<(Config, Query, Arc<dyn RpcTransport>)> {
    let mut config = Config::from_env()?;
    config.apply_overrides(&cli.overrides())?;

    let query = config.to_query()?;
    let transport = HttpTransport::from_config(&config.api)?;

    Ok((config, query, Arc::new(transport)))
}

fn init_logging(verbose: bool) {
    // stdout is reserved for the value
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let filter = log_filter(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

fn finish(status: io::Result<ExitStatus>) -> ExitCode {
    ExitCode::from(report::settle(status).code())
}
