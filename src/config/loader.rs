//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LoggerConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::log::{ColorMode, ParseColorModeError, ParseSeverityError};

/// Overrides `level` when set.
pub const LEVEL_ENV: &str = "TINTLOG_LEVEL";

/// Overrides `color` when set.
pub const COLOR_ENV: &str = "TINTLOG_COLOR";

/// Any non-empty value selects [`ColorMode::Never`] unless [`COLOR_ENV`] is set.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid TINTLOG_LEVEL: {0}")]
    EnvLevel(#[source] ParseSeverityError),

    #[error("Invalid TINTLOG_COLOR: {0}")]
    EnvColor(#[source] ParseColorModeError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoggerConfig, ConfigError> {
    let config: LoggerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(
        path = ?path,
        level = %config.level,
        overrides = config.colors.overrides().count(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Apply [`LEVEL_ENV`], [`COLOR_ENV`] and [`NO_COLOR_ENV`] from the process
/// environment.
pub fn apply_env_overrides(config: &mut LoggerConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup. Empty values are
/// ignored.
pub fn apply_overrides<F>(config: &mut LoggerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(level) = value(LEVEL_ENV) {
        config.level = level.parse().map_err(ConfigError::EnvLevel)?;
    }
    if let Some(color) = value(COLOR_ENV) {
        config.color = color.parse::<ColorMode>().map_err(ConfigError::EnvColor)?;
    } else if value(NO_COLOR_ENV).is_some() {
        config.color = ColorMode::Never;
    }
    Ok(())
}
