//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/mydayics/config.toml` by default. Every section is optional.
//!
//! ```toml
//! [myday]
//! endpoint = "https://api.myday.cloud/legacy/api/aggregate/v2/calendaritem"
//! token = "env::MYDAY_TOKEN"
//! timeout_secs = 30
//!
//! [export]
//! output = "university_schedule.ics"
//! semester_days = 180
//!
//! [fetch]
//! poll_interval_ms = 100
//! ```
//!
//! The `token` value supports secret references:
//! - `pass::path/in/store`, resolved via `pass show`
//! - `env::VAR_NAME`, resolved from the environment
//! - plain text, used as-is

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mydayics_core::time::DEFAULT_SEMESTER_DAYS;
use mydayics_providers::myday::{DEFAULT_ENDPOINT, MyDayConfig};
use serde::{Deserialize, Serialize};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT: &str = "university_schedule.ics";

/// Configuration for the mydayics client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// MyDay API settings.
    pub myday: MyDaySettings,

    /// Export settings.
    pub export: ExportSettings,

    /// Fetch coordination settings.
    pub fetch: FetchSettings,
}

/// MyDay API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MyDaySettings {
    /// Calendar item endpoint.
    pub endpoint: String,

    /// Bearer token or a secret reference (`pass::`, `env::`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for MyDaySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for MyDaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token.as_deref().map(|t| {
            if crate::secret::is_reference(t) {
                t
            } else {
                "****"
            }
        });
        f.debug_struct("MyDaySettings")
            .field("endpoint", &self.endpoint)
            .field("token", &token)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MyDaySettings {
    /// Builds the provider configuration.
    pub fn to_provider_config(&self) -> Result<MyDayConfig, String> {
        let mut config = MyDayConfig::new(&self.endpoint)
            .map_err(|e| format!("invalid endpoint '{}': {}", self.endpoint, e))?;

        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Resolves the configured token, expanding secret references.
    ///
    /// Returns `Ok(None)` when no token is configured.
    pub fn resolve_token(&self) -> Result<Option<String>, String> {
        self.token
            .as_deref()
            .map(|raw| {
                crate::secret::resolve(raw).map_err(|e| format!("failed to resolve token: {}", e))
            })
            .transpose()
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output file.
    pub output: PathBuf,

    /// Length of the "semester" timeframe in days.
    pub semester_days: i64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            semester_days: DEFAULT_SEMESTER_DAYS,
        }
    }
}

/// Fetch coordination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Interval between completion checks while a fetch runs.
    pub poll_interval_ms: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl FetchSettings {
    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Checks values that TOML parsing alone cannot.
    pub fn validate(&self) -> Result<(), String> {
        self.myday.to_provider_config()?;

        if self.export.semester_days <= 0 {
            return Err(format!(
                "export.semester_days must be positive, got {}",
                self.export.semester_days
            ));
        }
        if self.export.output.as_os_str().is_empty() {
            return Err("export.output must not be empty".to_string());
        }
        if self.fetch.poll_interval_ms == 0 {
            return Err("fetch.poll_interval_ms must be positive".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mydayics")
    }
}
