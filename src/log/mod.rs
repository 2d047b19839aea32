//! Level-gated formatter.
//!
//! # Data Flow
//! ```text
//! info!(logger, "...", args)
//!     → logger.rs: severity >= threshold?     (no: return, nothing formatted)
//!     → palette.rs: color for the severity    (loaded per call)
//!     → console::Color::wrap("[INFO ] msg")
//!     → sink lock → one write_all → "\n"-terminated record
//!
//! fatal_exit!(logger, ...)
//!     → always written → flush → process::exit(1)
//! ```
//!
//! # Design Decisions
//! - Gate is inclusive (`severity >= threshold`) for every entry point
//! - Threshold and palette live in the logger instance, not in globals
//! - Threshold is a relaxed atomic: last write wins
//! - Palette sits behind `ArcSwap` so overrides apply without locking readers

pub mod logger;
pub mod macros;
pub mod palette;
pub mod severity;

pub use logger::{ColorMode, Logger, ParseColorModeError, FATAL_EXIT_CODE};
pub use palette::Palette;
pub use severity::{ParseSeverityError, Severity};
