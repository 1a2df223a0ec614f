//! Off-path fetch coordination.
//!
//! The [`FetchCoordinator`] runs one [`EventSource`] query on a worker task
//! and hands back its [`FetchOutcome`] through a one-shot channel. The caller
//! keeps control the whole time: [`FetchCoordinator::start`] returns at once,
//! [`FetchCoordinator::poll`] never blocks, and [`FetchCoordinator::wait`]
//! checks at a fixed interval so a UI loop can interleave other work.
//!
//! ```text
//!          start()            outcome taken
//!   Idle ───────────► Fetching ─────────────► Idle
//!             │
//!             └── start() while Fetching: Busy
//! ```

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use mydayics_providers::{EventSource, FetchOutcome, FetchRequest};

/// Default interval between checks in [`FetchCoordinator::wait`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Message delivered when the worker ends without producing an outcome.
pub const WORKER_LOST_MESSAGE: &str = "fetch worker stopped before producing a result";

/// Errors from [`FetchCoordinator::start`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// A fetch is already in flight.
    #[error("a fetch is already in progress")]
    Busy,

    /// `start` was called outside a Tokio runtime.
    #[error("no async runtime available to run the fetch")]
    NoRuntime,
}

/// Observable state of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready to accept a request.
    Idle,
    /// A worker is running; the outcome has not been collected yet.
    Fetching,
}

enum State {
    Idle,
    Fetching {
        receiver: oneshot::Receiver<FetchOutcome>,
        started: Instant,
    },
}

/// Runs fetches off the caller's path, one at a time.
pub struct FetchCoordinator {
    source: Arc<dyn EventSource>,
    poll_interval: Duration,
    state: State,
}

impl FetchCoordinator {
    /// Creates an idle coordinator for `source`.
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            poll_interval: DEFAULT_POLL_INTERVAL,
            state: State::Idle,
        }
    }

    /// Sets the interval used by [`wait`](Self::wait). Zero is raised to 1 ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// The configured poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Fetching { .. } => Phase::Fetching,
        }
    }

    /// Returns true while a fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.phase() == Phase::Fetching
    }

    /// Spawns a worker for `request` and returns immediately.
    pub fn start(&mut self, request: FetchRequest) -> Result<(), CoordinatorError> {
        if self.is_busy() {
            return Err(CoordinatorError::Busy);
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| CoordinatorError::NoRuntime)?;

        let (sender, receiver) = oneshot::channel();
        let source = Arc::clone(&self.source);
        debug!(source = source.name(), "starting fetch worker");

        runtime.spawn(async move {
            let outcome = source.fetch_events(request).await;
            if sender.send(outcome).is_err() {
                debug!("fetch outcome dropped: coordinator is gone");
            }
        });

        self.state = State::Fetching {
            receiver,
            started: Instant::now(),
        };
        Ok(())
    }

    /// Collects the outcome if it is ready. Never blocks.
    ///
    /// Returns `None` while idle or while the worker is still running. Each
    /// outcome is returned exactly once; afterwards the coordinator is idle.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        let State::Fetching { receiver, started } = &mut self.state else {
            return None;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                warn!("fetch worker ended without an outcome");
                FetchOutcome::transport(WORKER_LOST_MESSAGE)
            }
        };

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "fetch finished");
        self.state = State::Idle;
        Some(outcome)
    }

    /// Checks every poll interval until the outcome arrives.
    ///
    /// Returns `None` immediately if no fetch is in flight.
    pub async fn wait(&mut self) -> Option<FetchOutcome> {
        if !self.is_busy() {
            return None;
        }

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Some(outcome) = self.poll() {
                return Some(outcome);
            }
        }
    }
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("source", &self.source.name())
            .field("poll_interval", &self.poll_interval)
            .field("phase", &self.phase())
            .finish()
    }
}
