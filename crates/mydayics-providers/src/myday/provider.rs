//! MyDay provider implementation.

use tracing::info;

use crate::classify::classify;
use crate::error::ProviderResult;
use crate::outcome::FetchOutcome;
use crate::provider::{BoxFuture, EventSource, FetchRequest};

use super::client::MyDayClient;
use super::config::MyDayConfig;

/// MyDay event source.
#[derive(Debug)]
pub struct MyDayProvider {
    client: MyDayClient,
    display_name: String,
}

impl MyDayProvider {
    /// Creates a provider for the configured endpoint.
    pub fn new(config: MyDayConfig) -> ProviderResult<Self> {
        let client = MyDayClient::new(config)?;
        let display_name = format!(
            "myday:{}",
            client.endpoint().host_str().unwrap_or("unknown")
        );

        Ok(Self {
            client,
            display_name,
        })
    }

    async fn fetch(&self, request: FetchRequest) -> FetchOutcome {
        info!(
            provider = %self.display_name,
            start = %request.window.start,
            end = %request.window.end,
            "fetching calendar items"
        );

        let outcome = classify(self.client.query(&request.window, &request.token).await);

        if let FetchOutcome::Success { events, discarded } = &outcome {
            info!(count = events.len(), discarded, "fetch complete");
        }
        outcome
    }
}

impl EventSource for MyDayProvider {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn fetch_events(&self, request: FetchRequest) -> BoxFuture<'_, FetchOutcome> {
        Box::pin(async move { self.fetch(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::AUTH_HINT;
    use crate::error::ProviderErrorCode;
    use chrono::{TimeZone, Utc};
    use mydayics_core::TimeWindow;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(token: &str) -> FetchRequest {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        );
        FetchRequest::new(window, token)
    }

    async fn provider_answering(template: ResponseTemplate) -> (MockServer, MyDayProvider) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&server)
            .await;
        let config = MyDayConfig::new(format!("{}/calendaritem", server.uri())).unwrap();
        let provider = MyDayProvider::new(config).unwrap();
        (server, provider)
    }

    #[test]
    fn name_includes_host() {
        let provider = MyDayProvider::new(MyDayConfig::default()).unwrap();
        assert_eq!(provider.name(), "myday:api.myday.cloud");
    }

    #[tokio::test]
    async fn success_end_to_end() {
        let body = r#"{"results": [
            {"Id": "a1", "Subject": "Lab", "Location": "Room 101",
             "Start": "2026-02-10T09:00:00+02:00", "End": "2026-02-10T10:00:00+02:00"},
            {"Id": "a2", "Subject": "Broken", "End": "2026-02-11T10:00:00"}
        ]}"#;
        let (_server, provider) =
            provider_answering(ResponseTemplate::new(200).set_body_string(body)).await;

        match provider.fetch_events(request("abc")).await {
            FetchOutcome::Success { events, discarded } => {
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].uid(), Some("a1"));
                assert_eq!(discarded, 1);
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unauthorized_end_to_end() {
        let body = r#"{"Message": "Authorization has been denied for this request."}"#;
        let (_server, provider) =
            provider_answering(ResponseTemplate::new(401).set_body_string(body)).await;

        match provider.fetch_events(request("stale")).await {
            FetchOutcome::ApiError { code, hint, detail } => {
                assert_eq!(code, ProviderErrorCode::AuthenticationFailed);
                assert_eq!(hint, AUTH_HINT);
                assert_eq!(
                    detail.as_deref(),
                    Some("Authorization has been denied for this request.")
                );
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn maintenance_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param(
                "$filter",
                "End gt datetime'2026-02-01T00:00:00Z' and Start lt datetime'2026-03-01T00:00:00Z'",
            ))
            .respond_with(ResponseTemplate::new(503).set_body_string(r#"{"error":"maintenance"}"#))
            .expect(1)
            .mount(&server)
            .await;
        let config = MyDayConfig::new(format!("{}/calendaritem", server.uri())).unwrap();
        let provider = MyDayProvider::new(config).unwrap();

        match provider.fetch_events(request("abc")).await {
            FetchOutcome::ApiError { hint, detail, .. } => {
                assert_eq!(hint, "upstream server error");
                assert_eq!(detail.as_deref(), Some("maintenance"));
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let server = MockServer::start().await;
        let config = MyDayConfig::new(format!("{}/calendaritem", server.uri())).unwrap();
        let provider = MyDayProvider::new(config).unwrap();
        drop(server);

        let outcome = provider.fetch_events(request("abc")).await;
        assert!(matches!(outcome, FetchOutcome::TransportError { .. }));
    }
}
