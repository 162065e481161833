use thiserror::Error;

/// Errors raised while talking to the monitoring API.
///
/// "No matching item" and "no history" are not errors; they are ordinary
/// results (see `Resolution` and `Latest`).
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("Request failed: {reason}")]
    Transport { reason: String },

    #[error("Server answered with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Unexpected response: {reason}")]
    Protocol { reason: String },

    #[error("API error {code}: {message}{}", format_data(.data))]
    Api {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("Key {key} matches {count} items{}; refusing to pick one", format_host(.host))]
    AmbiguousMatch {
        key: String,
        host: Option<String>,
        count: usize,
    },
}

impl LookupError {
    pub fn transport(reason: impl Into<String>) -> Self {
        LookupError::Transport {
            reason: reason.into(),
        }
    }

    pub fn protocol(reason: impl Into<String>) -> Self {
        LookupError::Protocol {
            reason: reason.into(),
        }
    }

    /// True for failures below the JSON-RPC layer (network, TLS, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LookupError::Transport { .. } | LookupError::HttpStatus { .. }
        )
    }
}

fn format_data(data: &Option<String>) -> String {
    match data {
        Some(d) if !d.is_empty() => format!(" ({})", d),
        _ => String::new(),
    }
}

fn format_host(host: &Option<String>) -> String {
    match host {
        Some(h) => format!(" on host {}", h),
        None => String::new(),
    }
}

/// Invalid lookup input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Item key must not be empty")]
    EmptyKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_formatting() {
        let error = LookupError::Api {
            code: -32602,
            message: "Invalid params.".to_string(),
            data: Some("Not authorized.".to_string()),
        };

        let msg = error.to_string();
        assert!(msg.contains("-32602"));
        assert!(msg.contains("Invalid params."));
        assert!(msg.contains("(Not authorized.)"));
    }

    #[test]
    fn test_ambiguous_match_formatting() {
        let error = LookupError::AmbiguousMatch {
            key: "vfs.fs.size".to_string(),
            host: Some("db-02".to_string()),
            count: 3,
        };

        let msg = error.to_string();
        assert!(msg.contains("vfs.fs.size"));
        assert!(msg.contains("3 items"));
        assert!(msg.contains("on host db-02"));
    }

    #[test]
    fn test_transport_classification() {
        assert!(LookupError::transport("connection refused").is_transport());
        assert!(LookupError::HttpStatus { status: 502 }.is_transport());
        assert!(!LookupError::protocol("bad json").is_transport());
    }
}
