//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Renders the configuration as TOML.
pub fn render(config: &ClientConfig) -> ClientResult<String> {
    let mut shown = config.clone();
    let literal_token = shown
        .myday
        .token
        .as_deref()
        .is_some_and(|token| !crate::secret::is_reference(token));
    if literal_token {
        shown.myday.token = Some("****".to_string());
    }

    toml::to_string_pretty(&shown)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
}

/// Dump the current configuration to stdout. Literal tokens are masked.
pub fn dump(config: &ClientConfig, source: &Path) -> ClientResult<()> {
    println!("# config.toml ({})", source.display());
    println!("{}", render(config)?);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    if config.myday.token.is_some() {
        config.myday.resolve_token().map_err(ClientError::Config)?;
        println!("Token reference resolves.");
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(source: &Path) -> ClientResult<()> {
    println!("config: {}", source.display());
    Ok(())
}
