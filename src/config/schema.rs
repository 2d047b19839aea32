//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every
//! field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! level = "debug"
//! color = "auto"
//! timestamps = true
//!
//! [colors]
//! warn = ["bold", "yellow"]
//! error = [1, 31]
//! ```

use serde::{Deserialize, Serialize};

use crate::console::Color;
use crate::log::{ColorMode, Palette, Severity};

/// Root configuration for a [`Logger`](crate::Logger).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity that is written.
    pub level: Severity,

    /// Escape sequence policy.
    pub color: ColorMode,

    /// Prefix records with a local `YYYY/MM/DD HH:MM:SS` timestamp.
    pub timestamps: bool,

    /// Per-severity color overrides.
    pub colors: PaletteConfig,
}

/// Optional color override per severity. Unset entries keep the default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PaletteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<Color>,
}

impl PaletteConfig {
    pub fn get(&self, severity: Severity) -> Option<&Color> {
        match severity {
            Severity::Trace => self.trace.as_ref(),
            Severity::Debug => self.debug.as_ref(),
            Severity::Info => self.info.as_ref(),
            Severity::Warn => self.warn.as_ref(),
            Severity::Error => self.error.as_ref(),
            Severity::Fatal => self.fatal.as_ref(),
        }
    }

    /// Configured overrides, lowest severity first.
    pub fn overrides(&self) -> impl Iterator<Item = (Severity, &Color)> {
        Severity::ALL
            .into_iter()
            .filter_map(|severity| self.get(severity).map(|color| (severity, color)))
    }

    /// The default palette with the overrides applied.
    pub fn to_palette(&self) -> Palette {
        self.overrides()
            .fold(Palette::default(), |palette, (severity, color)| {
                palette.with(severity, color.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Attribute;

    #[test]
    fn test_empty_is_default() {
        let config: LoggerConfig = toml::from_str("").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.color, ColorMode::Always);
        assert_eq!(config.colors.to_palette(), Palette::default());
    }

    #[test]
    fn test_full_document() {
        let config: LoggerConfig = toml::from_str(
            r#"
            level = "WARN"
            color = "never"
            timestamps = true

            [colors]
            warn = ["bold", "yellow"]
            error = [1, 31]
            "#,
        )
        .unwrap();

        assert_eq!(config.level, Severity::Warn);
        assert_eq!(config.color, ColorMode::Never);
        assert!(config.timestamps);

        let palette = config.colors.to_palette();
        assert_eq!(palette.get(Severity::Warn).escape_sequence(), "1;33");
        assert_eq!(palette.get(Severity::Error).escape_sequence(), "1;31");
        assert_eq!(palette.get(Severity::Info), &Color::from(Attribute::FG_WHITE));
    }

    #[test]
    fn test_serialize_skips_unset_colors() {
        let mut config = LoggerConfig::default();
        config.colors.info = Some(Color::from(Attribute::FG_GREEN));
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("level = \"info\""));
        assert!(rendered.contains("info = [32]"));
        assert!(!rendered.contains("trace"));

        let parsed: LoggerConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
