//! Configuration file watcher for hot reload.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{parse_config, ConfigError};
use crate::config::schema::LoggerConfig;
use crate::log::Logger;

/// Adjusts each reloaded configuration before it is applied.
pub type OverrideHook = Box<dyn Fn(&mut LoggerConfig) -> Result<(), ConfigError> + Send>;

/// Watches the configuration file and applies every valid revision to a
/// shared logger.
pub struct ConfigWatcher<W> {
    path: PathBuf,
    logger: Arc<Logger<W>>,
    overrides: OverrideHook,
    update_tx: mpsc::Sender<LoggerConfig>,
}

impl<W> ConfigWatcher<W>
where
    W: Write + Send + 'static,
{
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver that sees each applied
    /// configuration.
    pub fn new(path: &Path, logger: Arc<Logger<W>>) -> (Self, mpsc::Receiver<LoggerConfig>) {
        let (update_tx, update_rx) = mpsc::channel();

        (
            Self {
                path: path.to_path_buf(),
                logger,
                overrides: Box::new(|_| Ok(())),
                update_tx,
            },
            update_rx,
        )
    }

    /// Run `overrides` on every reloaded configuration, so settings that
    /// take precedence over the file survive a reload.
    pub fn with_overrides<F>(mut self, overrides: F) -> Self
    where
        F: Fn(&mut LoggerConfig) -> Result<(), ConfigError> + Send + 'static,
    {
        self.overrides = Box::new(overrides);
        self
    }

    /// Start watching the file. Watching stops when the returned watcher is
    /// dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            logger,
            overrides,
            update_tx,
        } = self;
        let reload_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match reload(&reload_path, &overrides) {
                            Ok(Some(new_config)) => {
                                logger.apply(&new_config);
                                let _ = update_tx.send(new_config);
                            }
                            Ok(None) => tracing::debug!("Config file empty, waiting for write"),
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

/// `None` while the file is empty, as seen between truncate and write.
fn reload(path: &Path, overrides: &OverrideHook) -> Result<Option<LoggerConfig>, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    let mut config = parse_config(&content)?;
    overrides(&mut config)?;
    tracing::debug!(path = ?path, level = %config.level, "Configuration reloaded");
    Ok(Some(config))
}
