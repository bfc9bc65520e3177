//! Shared error type across teammetrics crates.

use thiserror::Error;

/// Stable error codes (used in logs and asserted by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or missing configuration.
    Config,
    /// Upstream (tsuru API) call failed.
    Upstream,
    /// Metric family registration rejected at startup.
    Registration,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in structured log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::Upstream => "UPSTREAM",
            ErrorCode::Registration => "REGISTRATION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TeamMetricsError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum TeamMetricsError {
    #[error("config: {0}")]
    Config(String),
    #[error("upstream {op}: {msg}")]
    Upstream { op: &'static str, msg: String },
    #[error("metric registration failed: {0}")]
    Registration(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TeamMetricsError {
    /// Build an upstream error for the named operation.
    pub fn upstream(op: &'static str, msg: impl Into<String>) -> Self {
        TeamMetricsError::Upstream { op, msg: msg.into() }
    }

    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TeamMetricsError::Config(_) => ErrorCode::Config,
            TeamMetricsError::Upstream { .. } => ErrorCode::Upstream,
            TeamMetricsError::Registration(_) => ErrorCode::Registration,
            TeamMetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
