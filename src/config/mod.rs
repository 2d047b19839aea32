//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → loader.rs (TINTLOG_LEVEL / TINTLOG_COLOR overrides)
//!     → LoggerConfig
//!     → Logger::from_config / Logger::apply
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → Logger::apply (threshold store, palette swap)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A rejected reload leaves the running logger untouched

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{apply_env_overrides, apply_overrides, load_config, parse_config, ConfigError};
pub use schema::{LoggerConfig, PaletteConfig};
pub use validation::ValidationError;
pub use watcher::{ConfigWatcher, OverrideHook};
