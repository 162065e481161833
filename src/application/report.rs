//! Turns a lookup outcome into process output.
//!
//! The value alone goes to stdout so the tool composes with shell pipelines;
//! every diagnostic goes to stderr.

use crate::domain::errors::LookupError;
use crate::domain::outcome::{ExitStatus, LookupOutcome};
use std::io::{self, Write};
use tracing::error;

pub fn render<O, E>(outcome: &LookupOutcome, out: &mut O, err: &mut E) -> io::Result<ExitStatus>
where
    O: Write,
    E: Write,
{
    match outcome {
        LookupOutcome::Success(record) => writeln!(out, "{}", record.value)?,
        LookupOutcome::NotFound(query) => {
            writeln!(err, "Error: no item found for key {}", query)?
        }
        LookupOutcome::NoData(item_id) => {
            writeln!(err, "Warning: item {} has no data available", item_id)?
        }
        LookupOutcome::Failed(error) => writeln!(err, "Error: {}", describe(error))?,
    }

    Ok(outcome.exit_status())
}

/// Reports a configuration failure (anyhow chain included).
pub fn render_config_error<E: Write>(error: &anyhow::Error, err: &mut E) -> io::Result<ExitStatus> {
    writeln!(err, "Configuration error: {:#}", error)?;
    Ok(ExitStatus::Configuration)
}

/// Final status once output has been attempted. A failed write (closed
/// pipe) gets its own status so it never reads as a lookup result.
pub fn settle(written: io::Result<ExitStatus>) -> ExitStatus {
    match written {
        Ok(status) => status,
        Err(e) => {
            error!("Failed to write output: {}", e);
            ExitStatus::Output
        }
    }
}

fn describe(error: &LookupError) -> String {
    match error {
        LookupError::Transport { .. } | LookupError::HttpStatus { .. } => {
            format!("could not reach the Zabbix API: {}", error)
        }
        LookupError::Protocol { .. } => format!("Zabbix API sent a malformed reply: {}", error),
        LookupError::Api { .. } => format!("Zabbix API rejected the request: {}", error),
        LookupError::AmbiguousMatch { .. } => error.to_string(),
    }
}
