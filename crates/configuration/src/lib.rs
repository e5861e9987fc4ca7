use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, DeploymentConfig, LoggingConfig, SelectionConfig};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `TRADEBOT_API__KEY` sets `api.key`.
pub const ENV_PREFIX: &str = "TRADEBOT";

/// Loads the application configuration from `config.toml` and the environment.
///
/// This function is the primary entry point for this crate. The file is optional:
/// every setting has a default except the API credentials, which are checked
/// separately with [`ApiConfig::validate`] by the modes that need them.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Same as [`load_config`], reading the file at `path` instead.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
