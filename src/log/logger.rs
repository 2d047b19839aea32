//! The level-gated logger.

use std::fmt::{self, Write as _};
use std::io::{self, IsTerminal, Write};
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LoggerConfig;
use crate::console::{format_template, Arg, Color};
use crate::log::palette::Palette;
use crate::log::severity::Severity;

/// Exit status used by [`Logger::fatal_exit`].
pub const FATAL_EXIT_CODE: i32 = 1;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// When to emit escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always colorize, even when the terminal cannot interpret the codes.
    #[default]
    Always,
    /// Never colorize.
    Never,
    /// Colorize when the logger's sink is a terminal and `NO_COLOR` is
    /// unset or empty.
    Auto,
}

impl ColorMode {
    /// Resolve the mode for a sink, reading `NO_COLOR` from the environment.
    pub fn should_colorize(self, terminal: bool) -> bool {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        self.resolve(terminal, no_color)
    }

    fn resolve(self, terminal: bool, no_color: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal && !no_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color mode `{0}` (expected always, never or auto)")]
pub struct ParseColorModeError(pub String);

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            _ => Err(ParseColorModeError(s.to_string())),
        }
    }
}

/// Severity-gated, colorizing writer.
///
/// A logger owns its sink and is shared by reference (or `Arc`) between
/// call sites. Threshold and palette may be changed at any time; every call
/// reads them afresh.
///
/// ```
/// use tintlog::{Logger, Severity};
///
/// let logger = Logger::new(Vec::new());
/// logger.set_threshold(Severity::Warn);
/// tintlog::info!(logger, "dropped");
/// tintlog::warn!(logger, "disk {}% full", 93);
///
/// let out = String::from_utf8(logger.into_inner()).unwrap();
/// assert_eq!(out, "\x1b[33m[WARN ] disk 93% full\x1b[0m\n");
/// ```
pub struct Logger<W = io::Stdout> {
    threshold: AtomicU8,
    palette: ArcSwap<Palette>,
    color_mode: Mutex<ColorMode>,
    colorize: AtomicBool,
    timestamps: AtomicBool,
    terminal: bool,
    sink: Mutex<W>,
}

impl Logger<io::Stdout> {
    /// A logger writing to standard output with default settings.
    ///
    /// [`ColorMode::Auto`] colorizes only if stdout is a terminal.
    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        Self::new(io::stdout()).with_terminal(terminal)
    }
}

impl Default for Logger<io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> Logger<W> {
    /// Threshold `info`, default palette, colors always on, no timestamps.
    ///
    /// The sink is assumed not to be a terminal; see
    /// [`with_terminal`](Self::with_terminal).
    pub fn new(sink: W) -> Self {
        Self {
            threshold: AtomicU8::new(Severity::default().as_u8()),
            palette: ArcSwap::from_pointee(Palette::default()),
            color_mode: Mutex::new(ColorMode::default()),
            colorize: AtomicBool::new(true),
            timestamps: AtomicBool::new(false),
            terminal: false,
            sink: Mutex::new(sink),
        }
    }

    /// Declare whether the sink is a terminal, which decides
    /// [`ColorMode::Auto`].
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        let mode = *self.color_mode.get_mut().unwrap_or_else(PoisonError::into_inner);
        self.set_color_mode(mode);
        self
    }

    /// Build a logger from an already validated configuration.
    pub fn from_config(sink: W, config: &LoggerConfig) -> Self {
        let logger = Self::new(sink);
        logger.apply(config);
        logger
    }

    /// Replace threshold, palette, color mode and timestamp setting.
    pub fn apply(&self, config: &LoggerConfig) {
        self.set_threshold(config.level);
        self.set_palette(config.colors.to_palette());
        self.set_color_mode(config.color);
        self.set_timestamps(config.timestamps);
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_threshold(&self, threshold: Severity) {
        let previous = self.threshold.swap(threshold.as_u8(), Ordering::Relaxed);
        if previous != threshold.as_u8() {
            tracing::debug!(threshold = %threshold, "Log threshold changed");
        }
    }

    /// Snapshot of the current palette.
    pub fn palette(&self) -> Arc<Palette> {
        self.palette.load_full()
    }

    pub fn set_palette(&self, palette: Palette) {
        self.palette.store(Arc::new(palette));
    }

    /// Override the color of one severity. Takes effect on the next call.
    pub fn set_color(&self, severity: Severity, color: Color) {
        self.palette
            .rcu(|current| Palette::clone(current).with(severity, color.clone()));
    }

    pub fn set_color_mode(&self, mode: ColorMode) {
        let mut current = self.color_mode.lock().unwrap_or_else(PoisonError::into_inner);
        *current = mode;
        self.colorize
            .store(mode.should_colorize(self.terminal), Ordering::Relaxed);
    }

    pub fn color_mode(&self) -> ColorMode {
        *self.color_mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn colors_enabled(&self) -> bool {
        self.colorize.load(Ordering::Relaxed)
    }

    pub fn set_timestamps(&self, enabled: bool) {
        self.timestamps.store(enabled, Ordering::Relaxed);
    }

    /// Whether a record at `severity` passes the threshold.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Render one record, newline included, without writing it.
    pub fn render(&self, severity: Severity, args: fmt::Arguments<'_>) -> String {
        self.render_record(severity, &args)
    }

    fn render_record(&self, severity: Severity, message: &dyn fmt::Display) -> String {
        let mut record = String::with_capacity(64);
        if self.timestamps.load(Ordering::Relaxed) {
            let _ = write!(record, "{} ", Local::now().format(TIMESTAMP_FORMAT));
        }
        if self.colorize.load(Ordering::Relaxed) {
            let palette = self.palette.load();
            palette
                .get(severity)
                .wrap_into(&mut record, &format_args!("[{}] {}", severity.label(), message));
        } else {
            let _ = write!(record, "[{}] {}", severity.label(), message);
        }
        record.push('\n');
        record
    }

    fn emit(&self, severity: Severity, message: &dyn fmt::Display) -> io::Result<()> {
        let record = self.render_record(severity, message);
        self.write_raw(record.as_bytes())
    }

    fn write_raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(bytes)
    }

    /// Write a record if `severity` passes the threshold.
    ///
    /// `args` is only formatted past the gate. Write errors are dropped.
    /// A `Fatal` record always passes but does not end the process; use
    /// [`fatal_exit`](Self::fatal_exit) for that.
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(severity) {
            return;
        }
        let _ = self.emit(severity, &args);
    }

    /// Like [`log`](Self::log) for a template only known at run time.
    pub fn log_template(&self, severity: Severity, template: &str, args: &[Arg<'_>]) {
        if !self.enabled(severity) {
            return;
        }
        let message = format_template(template, args);
        let _ = self.emit(severity, &message);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    /// Write a `FATAL` record regardless of the threshold, flush, and
    /// terminate the process with [`FATAL_EXIT_CODE`].
    pub fn fatal_exit(&self, args: fmt::Arguments<'_>) -> ! {
        let _ = self.emit(Severity::Fatal, &args);
        self.terminate()
    }

    /// [`fatal_exit`](Self::fatal_exit) for a runtime template.
    pub fn fatal_exit_template(&self, template: &str, args: &[Arg<'_>]) -> ! {
        let message = format_template(template, args);
        let _ = self.emit(Severity::Fatal, &message);
        self.terminate()
    }

    fn terminate(&self) -> ! {
        let _ = self.flush();
        process::exit(FATAL_EXIT_CODE)
    }

    /// Uncolored, ungated write followed by a newline.
    pub fn write_line(&self, args: fmt::Arguments<'_>) {
        let _ = self.write_raw(format!("{args}\n").as_bytes());
    }

    /// Uncolored, ungated write without a trailing newline.
    pub fn write_format(&self, args: fmt::Arguments<'_>) {
        let _ = self.write_raw(format!("{args}").as_bytes());
    }

    pub fn flush(&self) -> io::Result<()> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }

    /// Consume the logger and return its sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for Logger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &Severity::from_u8(self.threshold.load(Ordering::Relaxed)))
            .field("colorize", &self.colorize.load(Ordering::Relaxed))
            .field("terminal", &self.terminal)
            .field("timestamps", &self.timestamps.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
