//! Configuration management.

mod settings;

pub use settings::{AccountingSettings, AppConfig, AppSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load and validate configuration from file and environment.
///
/// Environment variables override the file, e.g.
/// `PERF__ACCOUNTING__MULTIPLIER=50`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let app = read_config(path)?;
    app.validate().map_err(ConfigError::Message)?;
    Ok(app)
}

/// Read the layered configuration without checking section constraints.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("PERF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let app: AppConfig = toml::from_str(contents).map_err(|e| ConfigError::Message(e.to_string()))?;
    app.validate().map_err(ConfigError::Message)?;
    Ok(app)
}
