//! Client error types.
//!
//! These cover problems that stop a command before it can produce an
//! [`ExportStatus`](crate::status::ExportStatus). Fetch and export failures
//! are statuses, not errors.

use std::fmt;

use crate::coordinator::CoordinatorError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Invalid timeframe arguments.
    Timeframe(mydayics_core::TimeframeError),
    /// The event source could not be built.
    Provider(String),
    /// The fetch could not be started.
    Coordinator(CoordinatorError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Timeframe(err) => write!(f, "invalid timeframe: {}", err),
            Self::Provider(msg) => write!(f, "provider error: {}", msg),
            Self::Coordinator(err) => write!(f, "fetch error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeframe(err) => Some(err),
            Self::Coordinator(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<mydayics_core::TimeframeError> for ClientError {
    fn from(err: mydayics_core::TimeframeError) -> Self {
        Self::Timeframe(err)
    }
}

impl From<CoordinatorError> for ClientError {
    fn from(err: CoordinatorError) -> Self {
        Self::Coordinator(err)
    }
}

impl From<mydayics_providers::ProviderError> for ClientError {
    fn from(err: mydayics_providers::ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}
