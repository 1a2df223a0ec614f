//! The terminal result of one fetch.

use mydayics_core::EventRecord;

use crate::error::ProviderErrorCode;

/// What a fetch produced. Exactly one is created per fetch and it is never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered with a results collection (possibly empty).
    Success {
        /// Normalized records, in provider order.
        events: Vec<EventRecord>,
        /// Items dropped by the normalizer.
        discarded: usize,
    },
    /// The server answered, but not with data.
    ApiError {
        /// Category of the failure.
        code: ProviderErrorCode,
        /// What the user should do about it.
        hint: String,
        /// Best-effort explanation extracted from the response body.
        detail: Option<String>,
    },
    /// The server could not be reached.
    TransportError {
        /// Fixed network hint plus the underlying cause.
        message: String,
    },
}

impl FetchOutcome {
    /// Creates a success outcome.
    pub fn success(events: Vec<EventRecord>, discarded: usize) -> Self {
        Self::Success { events, discarded }
    }

    /// Creates an API error outcome.
    pub fn api_error(
        code: ProviderErrorCode,
        hint: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self::ApiError {
            code,
            hint: hint.into(),
            detail,
        }
    }

    /// Creates a transport error outcome.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    /// Returns true for [`FetchOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true for a success with no events.
    pub fn is_empty_success(&self) -> bool {
        matches!(self, Self::Success { events, .. } if events.is_empty())
    }

    /// The error category, `None` on success.
    pub fn error_code(&self) -> Option<ProviderErrorCode> {
        match self {
            Self::Success { .. } => None,
            Self::ApiError { code, .. } => Some(*code),
            Self::TransportError { .. } => Some(ProviderErrorCode::NetworkError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_success_is_not_an_error() {
        let outcome = FetchOutcome::success(Vec::new(), 0);
        assert!(outcome.is_success());
        assert!(outcome.is_empty_success());
        assert_eq!(outcome.error_code(), None);
    }

    #[test]
    fn error_codes() {
        let api = FetchOutcome::api_error(ProviderErrorCode::NotFound, "endpoint not found", None);
        assert!(!api.is_success());
        assert_eq!(api.error_code(), Some(ProviderErrorCode::NotFound));

        let transport = FetchOutcome::transport("offline");
        assert!(!transport.is_empty_success());
        assert_eq!(transport.error_code(), Some(ProviderErrorCode::NetworkError));
    }
}
