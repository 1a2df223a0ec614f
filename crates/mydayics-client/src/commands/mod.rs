//! Command implementations.

pub mod config;
pub mod export;
pub mod preview;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use mydayics_core::{TimeWindow, TimeframeMode};
use mydayics_providers::myday::{MyDayConfig, MyDayProvider};
use mydayics_providers::{BearerToken, EventSource, FetchOutcome, FetchRequest};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::coordinator::{FetchCoordinator, WORKER_LOST_MESSAGE};
use crate::error::{ClientError, ClientResult};

/// Everything one fetch needs, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Requested timeframe.
    pub mode: TimeframeMode,
    /// Concrete bounds of `mode`.
    pub window: TimeWindow,
    /// Normalized credential.
    pub token: BearerToken,
    /// Provider settings.
    pub provider: MyDayConfig,
    /// Coordinator poll interval.
    pub poll_interval: Duration,
}

impl FetchPlan {
    /// Resolves flags over config. The token comes from `--token` or
    /// `MYDAY_TOKEN` first, then from `[myday] token`.
    pub fn resolve(cli: &Cli, config: &ClientConfig) -> ClientResult<Self> {
        let mode = cli.timeframe_mode(config.export.semester_days)?;

        let raw_token = match cli.token.clone() {
            Some(token) => Some(token),
            None => config.myday.resolve_token().map_err(ClientError::Config)?,
        };
        let token = raw_token
            .map(|raw| BearerToken::new(&raw))
            .filter(|token| !token.is_empty())
            .ok_or_else(missing_token)?;

        let provider = config.myday.to_provider_config().map_err(ClientError::Config)?;

        let window = mode.resolve();
        if window.is_inverted() {
            warn!(start = %window.start, end = %window.end, "timeframe ends before it starts");
        } else if window.is_empty() {
            warn!(start = %window.start, "timeframe is empty");
        }

        Ok(Self {
            mode,
            window,
            token,
            provider,
            poll_interval: config.fetch.poll_interval(),
        })
    }

    /// The request handed to the event source.
    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            window: self.window,
            token: self.token.clone(),
        }
    }

    /// Builds the MyDay event source.
    pub fn source(&self) -> ClientResult<Arc<dyn EventSource>> {
        let source = MyDayProvider::new(self.provider.clone())?;
        info!(
            source = source.name(),
            timeframe = %self.mode.describe(),
            "event source ready"
        );
        Ok(Arc::new(source))
    }
}

fn missing_token() -> ClientError {
    ClientError::Config(format!(
        "no token given. Pass --token, set MYDAY_TOKEN, or add to {}:\n  \
         [myday]\n  \
         token = \"env::MYDAY_TOKEN\"",
        ClientConfig::default_path().display()
    ))
}

/// Runs one fetch through a [`FetchCoordinator`] and waits for its outcome.
pub async fn run_fetch(
    source: Arc<dyn EventSource>,
    request: FetchRequest,
    poll_interval: Duration,
) -> ClientResult<FetchOutcome> {
    let mut coordinator = FetchCoordinator::new(source).with_poll_interval(poll_interval);
    coordinator.start(request)?;

    let outcome = coordinator
        .wait()
        .await
        .unwrap_or_else(|| FetchOutcome::transport(WORKER_LOST_MESSAGE));

    if let Some(code) = outcome.error_code() {
        warn!(%code, retryable = code.is_retryable(), "fetch failed");
    }
    Ok(outcome)
}
