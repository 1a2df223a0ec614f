//! Status reported to the user at the end of a command.

use std::fmt;
use std::process::ExitCode;

use mydayics_providers::{FetchOutcome, ProviderErrorCode};

/// Follow-up shown after failures a fresh token usually fixes.
pub const CREDENTIAL_ADVICE: &str =
    "copy a fresh token from the MyDay web app and pass it with --token";

/// Follow-up shown after transient failures.
pub const RETRY_ADVICE: &str = "this is usually temporary; try again later";

/// The single result a command reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Events were fetched (and written, for exports).
    Success(usize),
    /// The request worked but the timeframe holds no events.
    EmptyResult,
    /// The server rejected the request.
    ApiError {
        code: ProviderErrorCode,
        hint: String,
        detail: Option<String>,
    },
    /// The server could not be reached.
    TransportError(String),
    /// The calendar could not be built or written.
    ExportFailure(String),
}

impl ExportStatus {
    /// Maps a fetch outcome. Successful outcomes report the event count.
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { events, .. } if events.is_empty() => Self::EmptyResult,
            FetchOutcome::Success { events, .. } => Self::Success(events.len()),
            FetchOutcome::ApiError { code, hint, detail } => Self::ApiError {
                code: *code,
                hint: hint.clone(),
                detail: detail.clone(),
            },
            FetchOutcome::TransportError { message } => Self::TransportError(message.clone()),
        }
    }

    /// The failure category, `None` unless the fetch itself failed.
    pub fn error_code(&self) -> Option<ProviderErrorCode> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::TransportError(_) => Some(ProviderErrorCode::NetworkError),
            _ => None,
        }
    }

    /// What the user can do next, if anything.
    pub fn advice(&self) -> Option<&'static str> {
        let code = self.error_code()?;
        if code.is_credential_problem() {
            Some(CREDENTIAL_ADVICE)
        } else if code.is_retryable() {
            Some(RETRY_ADVICE)
        } else {
            None
        }
    }

    /// Returns true for statuses that are not failures.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_) | Self::EmptyResult)
    }

    /// Process exit code: success for [`Success`](Self::Success) and
    /// [`EmptyResult`](Self::EmptyResult), failure otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(1) => write!(f, "1 event")?,
            Self::Success(count) => write!(f, "{} events", count)?,
            Self::EmptyResult => write!(f, "no events found in the selected timeframe")?,
            Self::ApiError { hint, detail, .. } => {
                write!(f, "error: {}", hint)?;
                if let Some(detail) = detail {
                    write!(f, "\n{}", detail)?;
                }
            }
            Self::TransportError(message) => write!(f, "error: {}", message)?,
            Self::ExportFailure(reason) => write!(f, "export failed: {}", reason)?,
        }
        if let Some(advice) = self.advice() {
            write!(f, "\n{}", advice)?;
        }
        Ok(())
    }
}
