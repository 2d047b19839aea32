//! Logging macros.
//!
//! Each macro takes the logger first and then `format!`-style arguments.
//! Arguments are captured with `format_args!`, so nothing is formatted for
//! records that fall below the threshold.

/// Log at an explicit severity.
///
/// ```
/// use tintlog::{Logger, Severity};
///
/// let logger = Logger::new(Vec::new());
/// tintlog::log!(logger, Severity::Error, "code {}", 7);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/// Log a `FATAL` record and terminate the process. Never returns.
#[macro_export]
macro_rules! fatal_exit {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_exit(::std::format_args!($($arg)+))
    };
}

/// Plain line to the logger's sink, uncolored and never gated.
#[macro_export]
macro_rules! write_line {
    ($logger:expr) => {
        $logger.write_line(::std::format_args!(""))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.write_line(::std::format_args!($($arg)+))
    };
}
