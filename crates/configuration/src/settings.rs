use crate::error::ConfigError;
use core_types::{LogLayout, SelectionPolicy};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub selection: SelectionConfig,
    pub deployment: DeploymentConfig,
    pub logging: LoggingConfig,
}

/// Exchange credentials and endpoint.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub key: String,
    pub secret: String,
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            base_url: "https://api.binance.com".to_string(),
        }
    }
}

// Hand-written so the secret never ends up in a log line.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key", &if self.key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("secret", &if self.secret.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiConfig {
    /// Both `api.key` and `api.secret` must be present before any network call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("api.key"));
        }
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingCredential("api.secret"));
        }
        Ok(())
    }
}

/// Parameters for picking which pairs get a bot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// How many pairs to keep after ranking.
    pub top_n: usize,
    /// Symbols must end with this suffix (e.g., "USDC").
    pub quote_asset: String,
    /// Status value that marks a pair as tradable.
    pub trading_status: String,
    pub policy: SelectionPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            quote_asset: "USDC".to_string(),
            trading_status: "TRADING".to_string(),
            policy: SelectionPolicy::default(),
        }
    }
}

/// Where and how the unit files are produced and installed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Directory under the operator's home that holds the units, the jar and the logs.
    pub bot_dir: String,
    pub jar_name: String,
    /// Command prefix placed before the jar path in `ExecStart=`.
    pub launcher: String,
    pub system_unit_dir: PathBuf,
    pub log_layout: LogLayout,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            bot_dir: "trader_bots".to_string(),
            jar_name: "tradingbot.jar".to_string(),
            launcher: "/usr/bin/java -jar".to_string(),
            system_unit_dir: PathBuf::from("/etc/systemd/system"),
            log_layout: LogLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// If set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the values that have no sensible fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "selection.top_n must be at least 1".to_string(),
            ));
        }
        if self.selection.quote_asset.is_empty() {
            return Err(ConfigError::ValidationError(
                "selection.quote_asset must not be empty".to_string(),
            ));
        }
        if self.deployment.bot_dir.is_empty() || self.deployment.jar_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "deployment.bot_dir and deployment.jar_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
