//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check extended color sequences in palette overrides are complete
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Plain attribute codes are never rejected; only the parameters that an
//!   extended color introducer (38/48) consumes are checked

use thiserror::Error;

use crate::config::schema::LoggerConfig;
use crate::console::{Attribute, Color};
use crate::log::Severity;

const EXTENDED_256: u32 = 5;
const EXTENDED_RGB: u32 = 2;
const MAX_COMPONENT: u32 = 255;

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("colors.{severity}: extended color at position {position} is missing parameters")]
    IncompleteExtendedColor { severity: Severity, position: usize },

    #[error("colors.{severity}: extended color mode {mode} at position {position} (expected 5 or 2)")]
    UnknownExtendedMode {
        severity: Severity,
        position: usize,
        mode: u32,
    },

    #[error("colors.{severity}: color component {value} at position {position} exceeds 255")]
    ComponentOutOfRange {
        severity: Severity,
        position: usize,
        value: u32,
    },
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    for (severity, color) in config.colors.overrides() {
        validate_color(severity, color, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_color(severity: Severity, color: &Color, errors: &mut Vec<ValidationError>) {
    let attributes = color.attributes();
    let mut position = 0;

    while position < attributes.len() {
        let attribute = attributes[position];
        if attribute != Attribute::FG_EXTENDED && attribute != Attribute::BG_EXTENDED {
            position += 1;
            continue;
        }

        let components = match attributes.get(position + 1).map(|a| a.code()) {
            Some(EXTENDED_256) => 1,
            Some(EXTENDED_RGB) => 3,
            Some(mode) => {
                errors.push(ValidationError::UnknownExtendedMode {
                    severity,
                    position: position + 1,
                    mode,
                });
                position += 2;
                continue;
            }
            None => {
                errors.push(ValidationError::IncompleteExtendedColor { severity, position });
                return;
            }
        };

        let first = position + 2;
        let Some(values) = attributes.get(first..first + components) else {
            errors.push(ValidationError::IncompleteExtendedColor { severity, position });
            return;
        };
        for (offset, value) in values.iter().enumerate() {
            if value.code() > MAX_COMPONENT {
                errors.push(ValidationError::ComponentOutOfRange {
                    severity,
                    position: first + offset,
                    value: value.code(),
                });
            }
        }
        position = first + components;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(severity: Severity, codes: &[u32]) -> LoggerConfig {
        let color = Color::new(codes.iter().copied().map(Attribute));
        let mut config = LoggerConfig::default();
        match severity {
            Severity::Trace => config.colors.trace = Some(color),
            Severity::Debug => config.colors.debug = Some(color),
            Severity::Info => config.colors.info = Some(color),
            Severity::Warn => config.colors.warn = Some(color),
            Severity::Error => config.colors.error = Some(color),
            Severity::Fatal => config.colors.fatal = Some(color),
        }
        config
    }

    #[test]
    fn test_plain_codes_pass() {
        assert!(validate_config(&LoggerConfig::default()).is_ok());
        assert!(validate_config(&config_with(Severity::Info, &[1, 4, 9999])).is_ok());
        assert!(validate_config(&config_with(Severity::Info, &[])).is_ok());
    }

    #[test]
    fn test_extended_colors_pass() {
        assert!(validate_config(&config_with(Severity::Warn, &[38, 5, 208])).is_ok());
        assert!(validate_config(&config_with(Severity::Warn, &[1, 48, 2, 10, 20, 30, 4])).is_ok());
    }

    #[test]
    fn test_incomplete_extended_color() {
        let errors = validate_config(&config_with(Severity::Error, &[1, 38])).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::IncompleteExtendedColor {
                severity: Severity::Error,
                position: 1
            }]
        );

        let errors = validate_config(&config_with(Severity::Error, &[48, 2, 1, 2])).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = config_with(Severity::Trace, &[38, 7, 1]);
        config.colors.fatal = Some(Color::new([38, 2, 300, 0, 256].map(Attribute)));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownExtendedMode {
                    severity: Severity::Trace,
                    position: 1,
                    mode: 7
                },
                ValidationError::ComponentOutOfRange {
                    severity: Severity::Fatal,
                    position: 2,
                    value: 300
                },
                ValidationError::ComponentOutOfRange {
                    severity: Severity::Fatal,
                    position: 4,
                    value: 256
                },
            ]
        );
        assert_eq!(
            errors[1].to_string(),
            "colors.fatal: color component 300 at position 2 exceeds 255"
        );
    }
}
