//! `tintlog` command-line front end.
//!
//! Writes leveled, colorized records to stdout. The tool's own diagnostics
//! go through `tracing` to stderr (filter with `RUST_LOG`), so they never mix
//! with the records.
//!
//! ```text
//! tintlog --level debug emit warn "disk almost full"
//! tintlog format error "%s failed after %d attempts" sync 3
//! tintlog --config tintlog.toml watch
//! ```

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tintlog::config::{apply_env_overrides, load_config, ConfigError, ConfigWatcher};
use tintlog::console::Arg;
use tintlog::{ColorMode, Logger, LoggerConfig, Severity};

#[derive(Parser)]
#[command(name = "tintlog")]
#[command(about = "Leveled, colorized console logging", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Minimum severity written; overrides the file and TINTLOG_LEVEL.
    #[arg(short, long, global = true)]
    level: Option<Severity>,

    /// always, never or auto; overrides the file and TINTLOG_COLOR.
    #[arg(long, global = true)]
    color: Option<ColorMode>,

    /// Prefix records with a timestamp.
    #[arg(long, global = true)]
    timestamps: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one record
    Emit {
        severity: Severity,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Write one record from a %-directive template
    Format {
        severity: Severity,
        template: String,
        args: Vec<String>,
    },
    /// Write a sample record for every non-fatal severity
    Demo,
    /// Print the resolved configuration
    Config {
        #[arg(long)]
        json: bool,
    },
    /// Re-run the demo each time the configuration file changes
    Watch,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tintlog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = tintlog::platform::enable_virtual_terminal() {
        tracing::warn!(error = %e, "Escape sequences may be printed literally");
    }

    let overrides = Overrides::from(&cli);
    let config = resolve_config(cli.config.as_deref(), overrides)?;
    let config_path = cli.config.clone();
    let logger = Logger::stdout();
    logger.apply(&config);
    let logger = Arc::new(logger);

    match cli.command {
        Commands::Emit { severity, message } => {
            let message = message.join(" ");
            if severity == Severity::Fatal {
                logger.fatal_exit(format_args!("{message}"));
            }
            logger.log(severity, format_args!("{message}"));
        }
        Commands::Format {
            severity,
            template,
            args,
        } => {
            let args: Vec<Arg<'_>> = args.iter().map(String::as_str).map(classify).collect();
            if severity == Severity::Fatal {
                logger.fatal_exit_template(&template, &args);
            }
            logger.log_template(severity, &template, &args);
        }
        Commands::Demo => demo(&*logger),
        Commands::Config { json } => {
            let rendered = if json {
                serde_json::to_string_pretty(&config)?
            } else {
                toml::to_string(&config)?
            };
            logger.write_line(format_args!("{}", rendered.trim_end()));
        }
        Commands::Watch => watch(config_path, Arc::clone(&logger), overrides)?,
    }

    logger.flush()?;
    Ok(())
}

/// Settings that take precedence over the configuration file.
#[derive(Clone, Copy)]
struct Overrides {
    level: Option<Severity>,
    color: Option<ColorMode>,
    timestamps: bool,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            level: cli.level,
            color: cli.color,
            timestamps: cli.timestamps,
        }
    }
}

impl Overrides {
    /// Environment, then flags.
    fn apply(self, config: &mut LoggerConfig) -> Result<(), ConfigError> {
        apply_env_overrides(config)?;

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if self.timestamps {
            config.timestamps = true;
        }
        Ok(())
    }
}

/// File, then environment, then flags.
fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<LoggerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    overrides.apply(&mut config)?;
    Ok(config)
}

/// Command-line values arrive as text; numbers and booleans are passed on
/// as such so `%d`, `%f` and `%t` accept them.
fn classify(raw: &str) -> Arg<'_> {
    if let Ok(n) = raw.parse::<i64>() {
        Arg::Int(n)
    } else if let Ok(x) = raw.parse::<f64>() {
        Arg::Float(x)
    } else if let Ok(b) = raw.parse::<bool>() {
        Arg::Bool(b)
    } else {
        Arg::Str(raw)
    }
}

fn demo<W: Write + Send>(logger: &Logger<W>) {
    tintlog::trace!(logger, "entering {}", "demo");
    tintlog::debug!(logger, "palette holds {} colors", Severity::ALL.len());
    tintlog::info!(logger, "listening on {}", "127.0.0.1:8080");
    tintlog::warn!(logger, "cache {}% full", 91);
    tintlog::error!(logger, "request {} failed: {}", 42, "connection reset");
}

fn watch(
    path: Option<PathBuf>,
    logger: Arc<Logger>,
    overrides: Overrides,
) -> Result<(), Box<dyn Error>> {
    let Some(path) = path else {
        return Err("watch requires --config <path>".into());
    };

    let (watcher, updates) = ConfigWatcher::new(&path, Arc::clone(&logger));
    let _watcher = watcher
        .with_overrides(move |config| overrides.apply(config))
        .run()?;

    demo(&*logger);
    for config in updates {
        tintlog::write_line!(logger, "-- reloaded, threshold {}", config.level);
        demo(&*logger);
    }
    Ok(())
}
