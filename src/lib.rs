//! Leveled, colorized console logging.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │  info!(logger, "listening on {}", port)
//!     ▼
//!  ┌──────────────────────────────┐      ┌──────────────────────────┐
//!  │ log::Logger                  │      │ console                  │
//!  │  threshold gate (>=)         │─────▶│  Color::escape_sequence  │
//!  │  palette (late-bound)        │      │  Color::wrap             │
//!  │  sink lock, one write/record │◀─────│  template formatting     │
//!  └──────────────┬───────────────┘      └──────────────────────────┘
//!                 ▼
//!        stdout: ESC[37m[INFO ] listening on 8080ESC[0m\n
//!
//!  config (TOML, env, hot reload) ──▶ Logger::apply
//!  platform::enable_virtual_terminal ── once at startup
//! ```
//!
//! # Example
//!
//! ```
//! use tintlog::console::{Attribute, Color};
//! use tintlog::{Logger, Severity};
//!
//! let logger = Logger::new(Vec::new());
//! logger.set_threshold(Severity::Debug);
//! logger.set_color(Severity::Error, Color::new([Attribute::BOLD, Attribute::FG_RED]));
//!
//! tintlog::trace!(logger, "not shown");
//! tintlog::error!(logger, "{} failed", "sync");
//!
//! let out = String::from_utf8(logger.into_inner()).unwrap();
//! assert_eq!(out, "\x1b[1;31m[ERROR] sync failed\x1b[0m\n");
//! ```

pub mod config;
pub mod console;
pub mod log;
pub mod platform;

pub use config::{ConfigError, LoggerConfig};
pub use console::{Arg, Attribute, Color};
pub use log::{ColorMode, Logger, Palette, Severity};
