//! MyDay calendar provider.
//!
//! Queries the MyDay aggregate calendar item endpoint with a bearer token
//! copied from an authenticated browser session. The token is never
//! acquired or refreshed here; an expired one surfaces as an
//! authentication failure.
//!
//! # Example
//!
//! ```ignore
//! use mydayics_providers::myday::{MyDayConfig, MyDayProvider};
//! use mydayics_providers::{EventSource, FetchRequest};
//!
//! let provider = MyDayProvider::new(MyDayConfig::default())?;
//! let outcome = provider.fetch_events(FetchRequest::new(window, token)).await;
//! ```

mod client;
mod config;
mod provider;

pub use client::{FILTER_PARAM, MyDayClient, build_filter};
pub use config::{DEFAULT_ENDPOINT, MyDayConfig};
pub use provider::MyDayProvider;
