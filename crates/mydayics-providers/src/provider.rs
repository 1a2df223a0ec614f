//! EventSource trait definition.
//!
//! An [`EventSource`] performs one query for one time window and reports a
//! classified [`FetchOutcome`]. Failures are part of the outcome rather than
//! an `Err`, so callers always get exactly one value to hand to the user.

use std::future::Future;
use std::pin::Pin;

use mydayics_core::TimeWindow;

use crate::credential::BearerToken;
use crate::outcome::FetchOutcome;

/// A boxed future for async trait methods.
///
/// Keeps [`EventSource`] object-safe so the coordinator can hold an
/// `Arc<dyn EventSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters of a single fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Window the events must overlap.
    pub window: TimeWindow,
    /// Normalized credential.
    pub token: BearerToken,
}

impl FetchRequest {
    /// Creates a request, normalizing the raw token.
    pub fn new(window: TimeWindow, raw_token: &str) -> Self {
        Self {
            window,
            token: BearerToken::new(raw_token),
        }
    }
}

/// A backend that can answer calendar queries.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; the fetch runs on a worker task
/// - `fetch_events` never panics on bad input and never returns early without
///   an outcome
pub trait EventSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Runs one query and classifies the result.
    fn fetch_events(&self, request: FetchRequest) -> BoxFuture<'_, FetchOutcome>;
}

/// A source that always answers with the same outcome.
///
/// Useful for tests, and as a stand-in when the real source cannot be built.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    outcome: FetchOutcome,
}

impl StaticSource {
    /// Creates a source answering `outcome` to every request.
    pub fn new(name: impl Into<String>, outcome: FetchOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events(&self, _request: FetchRequest) -> BoxFuture<'_, FetchOutcome> {
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{TimeZone, Utc};

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn request_normalizes_token() {
        let request = FetchRequest::new(window(), "abc");
        assert_eq!(request.token.header_value(), "Bearer abc");
    }

    #[tokio::test]
    async fn static_source_repeats_outcome() {
        let outcome =
            FetchOutcome::api_error(ProviderErrorCode::NotFound, "endpoint not found", None);
        let source = StaticSource::new("static", outcome.clone());
        let dyn_source: &dyn EventSource = &source;

        assert_eq!(dyn_source.name(), "static");
        assert_eq!(dyn_source.fetch_events(FetchRequest::new(window(), "t")).await, outcome);
        assert_eq!(dyn_source.fetch_events(FetchRequest::new(window(), "t")).await, outcome);
    }
}
