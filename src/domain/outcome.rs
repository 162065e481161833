use crate::domain::errors::LookupError;
use crate::domain::types::{ItemId, Query, ValueRecord};

/// Result of resolving a key to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ItemId),
    NotFound,
}

/// Result of asking for an item's latest value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Latest {
    Value(ValueRecord),
    NoData,
}

/// Terminal outcome of one resolve-then-fetch invocation.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Success(ValueRecord),
    NotFound(Query),
    NoData(ItemId),
    Failed(LookupError),
}

/// Process exit status for each outcome class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    NotFound,
    NoData,
    Transport,
    Protocol,
    Ambiguous,
    Configuration,
    /// The value could not be written (closed pipe, full disk)
    Output,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::NotFound => 1,
            ExitStatus::NoData => 2,
            ExitStatus::Transport => 3,
            ExitStatus::Protocol => 4,
            ExitStatus::Ambiguous => 5,
            ExitStatus::Configuration => 6,
            ExitStatus::Output => 7,
        }
    }
}

impl From<&LookupError> for ExitStatus {
    fn from(error: &LookupError) -> Self {
        match error {
            LookupError::Transport { .. } | LookupError::HttpStatus { .. } => ExitStatus::Transport,
            LookupError::Protocol { .. } | LookupError::Api { .. } => ExitStatus::Protocol,
            LookupError::AmbiguousMatch { .. } => ExitStatus::Ambiguous,
        }
    }
}

impl LookupOutcome {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            LookupOutcome::Success(_) => ExitStatus::Success,
            LookupOutcome::NotFound(_) => ExitStatus::NotFound,
            LookupOutcome::NoData(_) => ExitStatus::NoData,
            LookupOutcome::Failed(error) => ExitStatus::from(error),
        }
    }
}
