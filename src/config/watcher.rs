//! Hot reload of the padnav configuration file
//!
//! Editors tend to emit several modify events per save. One burst schedules
//! a single debounced reload, and reloads equal to the active configuration
//! are dropped, so the helper only sees real changes.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::PadnavConfig;
use crate::helper::GamepadHelper;

/// Delay before reloading so editors finish writing
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(100);

/// A configuration change picked up from disk
#[derive(Debug, Clone)]
pub struct ConfigReload {
    pub previous: Arc<PadnavConfig>,
    pub current: Arc<PadnavConfig>,
}

impl ConfigReload {
    /// Whether the frame driver must be rebuilt
    pub fn frame_interval_changed(&self) -> bool {
        self.previous.polling.frame_interval_ms != self.current.polling.frame_interval_ms
    }

    /// Push the runtime-adjustable settings into a live helper
    ///
    /// The virtual pad section only affects pads created afterwards.
    pub fn apply(&self, helper: &mut GamepadHelper) {
        let (old, new) = (&self.previous, &self.current);
        if old.polling != new.polling {
            debug!("Polling settings changed: {:?}", new.polling);
        }
        if old.navigation != new.navigation {
            debug!("Scroll behavior now {}", new.navigation.scroll_behavior);
        }
        if old.remote != new.remote {
            debug!("Remote settings changed: {:?}", new.remote);
        }
        helper.apply_config(new);
    }
}

/// Watches the config file and yields [`ConfigReload`]s
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<PadnavConfig>,
    current: Arc<PadnavConfig>,
}

impl ConfigWatcher {
    /// Load `config_path` and start watching it
    ///
    /// # Returns
    /// The watcher and the initially loaded configuration
    pub async fn new(config_path: String) -> Result<(Self, Arc<PadnavConfig>)> {
        let (tx, rx) = mpsc::channel(10);

        let initial_config = PadnavConfig::load(&config_path)
            .await
            .context("Failed to load initial config")?;
        let initial_config = Arc::new(initial_config);

        // notify callbacks run on their own OS thread, outside the runtime
        let runtime_handle = tokio::runtime::Handle::current();
        let reload_queued = Arc::new(AtomicBool::new(false));
        let watched_path = config_path.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    error!("Watch error: {}", e);
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                return;
            }
            if reload_queued.swap(true, Ordering::AcqRel) {
                return;
            }
            debug!("Config file modified: {:?}", event.paths);

            let config_path = watched_path.clone();
            let tx = tx.clone();
            let reload_queued = reload_queued.clone();

            runtime_handle.spawn(async move {
                tokio::time::sleep(RELOAD_DEBOUNCE).await;
                reload_queued.store(false, Ordering::Release);

                match PadnavConfig::load(&config_path).await {
                    Ok(new_config) => {
                        if let Err(e) = tx.send(new_config).await {
                            error!("Failed to send config update: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("Failed to reload config (keeping old config): {:#}", e);
                    }
                }
            });
        })?;

        watcher
            .watch(Path::new(&config_path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch config file: {}", config_path))?;

        info!("Config file watcher started for: {}", config_path);

        Ok((
            Self {
                _watcher: watcher,
                rx,
                current: initial_config.clone(),
            },
            initial_config,
        ))
    }

    /// Configuration currently in effect
    pub fn current(&self) -> Arc<PadnavConfig> {
        self.current.clone()
    }

    /// Wait for the next reload that differs from the active configuration
    ///
    /// Returns `None` once the watcher has shut down.
    pub async fn next_reload(&mut self) -> Option<ConfigReload> {
        loop {
            let loaded = self.rx.recv().await?;
            if loaded == *self.current {
                debug!("Config file saved without changes");
                continue;
            }

            info!("Configuration reloaded");
            let current = Arc::new(loaded);
            let previous = std::mem::replace(&mut self.current, current.clone());
            return Some(ConfigReload { previous, current });
        }
    }
}
