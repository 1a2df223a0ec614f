//! MyDay provider configuration.

use std::time::Duration;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Calendar item endpoint of the MyDay aggregate API.
pub const DEFAULT_ENDPOINT: &str = "https://api.myday.cloud/legacy/api/aggregate/v2/calendaritem";

/// Configuration for the MyDay provider.
#[derive(Debug, Clone)]
pub struct MyDayConfig {
    /// Calendar item endpoint.
    pub endpoint: Url,

    /// Request timeout. `None` waits as long as the transport allows.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl MyDayConfig {
    /// Creates a configuration for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(endpoint.as_ref())?;
        Ok(Self {
            endpoint: parsed,
            timeout: None,
            user_agent: format!("mydayics/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ProviderResult<()> {
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ProviderError::configuration(format!(
                    "endpoint must use http or https, got {}",
                    other
                )));
            }
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ProviderError::configuration("timeout must be non-zero"));
        }

        Ok(())
    }
}

impl Default for MyDayConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: None,
            user_agent: format!("mydayics/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
