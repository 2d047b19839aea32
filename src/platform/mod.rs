//! Terminal initialization.
//!
//! # Responsibilities
//! - Turn on escape sequence interpretation where the console needs an
//!   explicit opt-in (Windows virtual terminal processing)
//!
//! # Design Decisions
//! - Explicit call made once at startup; no teardown
//! - Failure is reported, never fatal: output degrades to visible codes
//! - No-op on platforms whose terminals interpret escapes natively

use std::io;

use thiserror::Error;

#[cfg(windows)]
mod windows;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("standard output is not attached to a console")]
    NoConsole,

    #[error("failed to query console mode: {0}")]
    QueryMode(#[source] io::Error),

    #[error("failed to set console mode: {0}")]
    SetMode(#[source] io::Error),
}

/// Enable escape sequence processing for standard output.
///
/// Call once before the first colored record. Safe to call again.
pub fn enable_virtual_terminal() -> Result<(), PlatformError> {
    #[cfg(windows)]
    {
        windows::enable_virtual_terminal()
    }

    #[cfg(not(windows))]
    {
        Ok(())
    }
}
