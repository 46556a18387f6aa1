use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Upstream Fetch Errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {source_name} returned status {status}")]
    UpstreamStatus {
        source_name: String,
        status: u16,
    },

    #[error("Response deserialization failed: {0}")]
    DeserializationError(String),

    #[error("Fetch from {source_name} timed out after {timeout:?}")]
    FetchTimeout {
        source_name: String,
        timeout: Duration,
    },

    // Aggregation Errors
    #[error("Source name is reserved: {0}")]
    ReservedSourceName(String),

    #[error("Source listed more than once: {0}")]
    DuplicateSource(String),

    #[error("Invalid source name: {0:?}")]
    InvalidSourceName(String),

    #[error("Invalid price summary: {0}")]
    InvalidSummary(String),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// True for failures that only cost a single source its data for one cycle.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::UpstreamStatus { .. }
                | Error::DeserializationError(_)
                | Error::FetchTimeout { .. }
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_a_fetch_failure() {
        let err = Error::FetchTimeout {
            source_name: "StubHub".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("StubHub"));
    }

    #[test]
    fn config_error_is_not_a_fetch_failure() {
        assert!(!Error::ConfigError("artist is required".into()).is_fetch_failure());
    }
}
