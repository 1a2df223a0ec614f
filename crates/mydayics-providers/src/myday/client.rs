//! MyDay HTTP client.
//!
//! Issues the calendar item query. This layer only moves bytes: any status
//! code is returned as an [`HttpResponse`] and interpreting it is left to
//! [`classify`](crate::classify::classify).

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::debug;

use mydayics_core::TimeWindow;

use crate::classify::{HttpResponse, TransportFailure};
use crate::credential::BearerToken;
use crate::error::{ProviderError, ProviderResult};

use super::config::MyDayConfig;

/// Name of the OData filter query parameter.
pub const FILTER_PARAM: &str = "$filter";

/// Format of the bounds inside the filter expression.
const FILTER_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builds the overlap predicate for `window`.
///
/// An event matches if it ends after the window starts and starts before the
/// window ends.
pub fn build_filter(window: &TimeWindow) -> String {
    format!(
        "End gt datetime'{}' and Start lt datetime'{}'",
        format_bound(window.start),
        format_bound(window.end)
    )
}

fn format_bound(instant: DateTime<Utc>) -> String {
    instant.format(FILTER_DATETIME_FORMAT).to_string()
}

/// MyDay calendar item client.
#[derive(Debug)]
pub struct MyDayClient {
    config: MyDayConfig,
    http_client: reqwest::Client,
}

impl MyDayClient {
    /// Creates a new client.
    pub fn new(config: MyDayConfig) -> ProviderResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                .with_source(e)
        })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &url::Url {
        &self.config.endpoint
    }

    /// Performs one GET for the window. Never retries.
    pub async fn query(
        &self,
        window: &TimeWindow,
        token: &BearerToken,
    ) -> Result<HttpResponse, TransportFailure> {
        let filter = build_filter(window);
        debug!(endpoint = %self.config.endpoint, %filter, %token, "querying calendar items");

        let response = self
            .http_client
            .get(self.config.endpoint.clone())
            .header(AUTHORIZATION, token.header_value())
            .header(ACCEPT, "application/json")
            .query(&[(FILTER_PARAM, filter.as_str())])
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_failure)?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse::new(status, body))
    }
}

fn transport_failure(e: reqwest::Error) -> TransportFailure {
    if e.is_timeout() {
        TransportFailure::new("request timeout")
    } else if e.is_connect() {
        TransportFailure::new(format!("connection failed: {}", e))
    } else if e.is_builder() {
        TransportFailure::new(format!("invalid request: {}", e))
    } else {
        TransportFailure::new(format!("request failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn february() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        )
    }

    fn client_for(server: &MockServer) -> MyDayClient {
        let config = MyDayConfig::new(format!("{}/calendaritem", server.uri())).unwrap();
        MyDayClient::new(config).unwrap()
    }

    #[test]
    fn filter_expression() {
        assert_eq!(
            build_filter(&february()),
            "End gt datetime'2026-02-01T00:00:00Z' and Start lt datetime'2026-03-01T00:00:00Z'"
        );
    }

    #[test]
    fn filter_drops_subseconds() {
        let start = Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 15).unwrap()
            + chrono::Duration::milliseconds(250);
        let window = TimeWindow::from_duration(start, chrono::Duration::days(1));
        assert_eq!(
            build_filter(&window),
            "End gt datetime'2026-02-10T08:30:15Z' and Start lt datetime'2026-02-11T08:30:15Z'"
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MyDayConfig::new("file:///tmp/items").unwrap();
        assert!(MyDayClient::new(config).is_err());
    }

    #[tokio::test]
    async fn sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/calendaritem"))
            .and(header("Authorization", "Bearer abc"))
            .and(header("Accept", "application/json"))
            .and(query_param(
                "$filter",
                "End gt datetime'2026-02-01T00:00:00Z' and Start lt datetime'2026-03-01T00:00:00Z'",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response = client
            .query(&february(), &BearerToken::new("abc"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"results": []}"#);
    }

    #[tokio::test]
    async fn error_status_is_not_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .query(&february(), &BearerToken::new("expired"))
            .await
            .unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.body, "denied");
    }

    #[tokio::test]
    async fn connection_refused_is_transport_failure() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        drop(server);

        let failure = client
            .query(&february(), &BearerToken::new("abc"))
            .await
            .unwrap_err();
        assert!(!failure.message.is_empty());
    }

    #[tokio::test]
    async fn timeout_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"results": []}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = MyDayConfig::new(format!("{}/calendaritem", server.uri()))
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        let client = MyDayClient::new(config).unwrap();

        let failure = client
            .query(&february(), &BearerToken::new("abc"))
            .await
            .unwrap_err();
        assert_eq!(failure.message, "request timeout");
    }
}
