//! CLI, configuration, fetch coordination and calendar export
//!
//! This crate provides the `mydayics` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod secret;
pub mod status;

pub use cli::Cli;
pub use coordinator::{CoordinatorError, FetchCoordinator, Phase};
pub use error::{ClientError, ClientResult};
pub use status::ExportStatus;
