//! Event sources, response classification and normalization.
//!
//! This crate turns a time window and a bearer token into a classified
//! [`FetchOutcome`]:
//!
//! - [`EventSource`] - The trait every calendar backend implements
//! - [`classify`] - HTTP status and body to [`FetchOutcome`]
//! - [`RawEvent`] - Loosely-typed calendar item as the API returns it
//! - [`normalize_results`] - Pipeline from `results` entries to [`EventRecord`]s
//! - [`ProviderError`] - Errors that prevent a source from being built
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   MyDay API     │
//! └────────┬────────┘
//!          │ HttpResponse / TransportFailure
//!          ▼
//! ┌─────────────────┐
//! │    classify     │──────► ApiError / TransportError
//! └────────┬────────┘
//!          │ results[]
//!          ▼ normalize_results()
//! ┌─────────────────┐
//! │  EventRecord    │──────► Success
//! └─────────────────┘
//! ```
//!
//! [`EventRecord`]: mydayics_core::EventRecord

pub mod classify;
pub mod credential;
pub mod error;
#[cfg(feature = "myday")]
pub mod myday;
pub mod normalize;
pub mod outcome;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use classify::{HttpResponse, TransportFailure, classify, classify_response, extract_detail};
pub use credential::{BearerToken, normalize_bearer};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use normalize::{NormalizedBatch, normalize_event, normalize_results};
pub use outcome::FetchOutcome;
pub use provider::{BoxFuture, EventSource, FetchRequest, StaticSource};
pub use raw_event::RawEvent;
