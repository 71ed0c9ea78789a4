//! File watcher for the configuration file.
//!
//! Watches the directory containing the resolved config file and re-runs
//! resolution when that file changes. Successful reloads are swapped into a
//! [`SharedConfig`]; failed reloads keep the current value.
//!
//! Emits reload events through a tokio watch channel. Uses debouncing to
//! coalesce rapid file changes (editors often write a file several times).

use super::env::Env;
use super::loader::ConfigLoader;
use super::types::Configuration;
use arc_swap::ArcSwap;
use notify_debouncer_mini::{DebouncedEvent, DebouncedEventKind, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// How often the event loop checks whether the handle was dropped.
const RECV_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Configuration shared between the watcher and its readers.
#[derive(Debug)]
pub struct SharedConfig {
    current: ArcSwap<Configuration>,
}

impl SharedConfig {
    pub fn new(config: Configuration) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn load(&self) -> Arc<Configuration> {
        self.current.load_full()
    }

    /// Replace the current configuration.
    pub fn store(&self, config: Arc<Configuration>) {
        self.current.store(config);
    }
}

/// Event types emitted when the config file changes.
#[derive(Debug, Clone)]
pub enum ConfigChangeEvent {
    /// The file changed and resolved cleanly; this is the new value.
    Reloaded(Arc<Configuration>),
    /// The file changed but resolution failed; the previous value is kept.
    ReloadFailed(String),
    /// Watcher encountered an error
    Error(String),
}

/// Configuration for the file watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce duration for coalescing rapid changes.
    pub debounce_duration: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_duration: Duration::from_millis(500),
        }
    }
}

/// Handle to control the config watcher.
pub struct ConfigWatcherHandle {
    /// Receiver for config change events.
    pub events: watch::Receiver<Option<ConfigChangeEvent>>,
    /// Handle to the watcher task (dropping this will stop the watcher).
    _task_handle: tokio::task::JoinHandle<()>,
}

impl ConfigWatcherHandle {
    /// Wait for the next config change event.
    pub async fn wait_for_change(&mut self) -> Option<ConfigChangeEvent> {
        loop {
            if self.events.changed().await.is_err() {
                return None; // Sender dropped
            }
            let event = self.events.borrow().clone();
            if event.is_some() {
                return event;
            }
        }
    }
}

/// Starts watching the file `loader` was resolved from.
///
/// Returns `Ok(None)` when there is nothing to watch: the configuration came
/// from `TEMPORAL_MCP_CONFIG`, or the file's directory does not exist.
/// Must be called from within a tokio runtime.
pub fn start_config_watcher<E>(
    loader: &ConfigLoader,
    default_path: PathBuf,
    env: E,
    shared: Arc<SharedConfig>,
    config: WatcherConfig,
) -> Result<Option<ConfigWatcherHandle>, notify::Error>
where
    E: Env + Send + 'static,
{
    let Some(file) = loader.source().path().map(Path::to_path_buf) else {
        info!("Configuration is inline, not watching any file");
        return Ok(None);
    };

    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        warn!(
            "Config directory does not exist, skipping watch: {}",
            dir.display()
        );
        return Ok(None);
    }

    let (event_tx, event_rx) = watch::channel(None);
    let (notify_tx, notify_rx) = mpsc::channel();

    let mut debouncer = new_debouncer(config.debounce_duration, notify_tx)?;
    info!("Watching config file: {}", file.display());
    debouncer
        .watcher()
        .watch(&dir, notify::RecursiveMode::NonRecursive)?;

    let task_handle = tokio::task::spawn_blocking(move || {
        // Keep the debouncer alive
        let _debouncer = debouncer;
        process_notify_events(notify_rx, event_tx, &file, &default_path, &env, &shared);
    });

    Ok(Some(ConfigWatcherHandle {
        events: event_rx,
        _task_handle: task_handle,
    }))
}

fn process_notify_events<E: Env + ?Sized>(
    rx: mpsc::Receiver<Result<Vec<DebouncedEvent>, notify::Error>>,
    tx: watch::Sender<Option<ConfigChangeEvent>>,
    file: &Path,
    default_path: &Path,
    env: &E,
    shared: &SharedConfig,
) {
    loop {
        // The debouncer owns the sending half, so the channel never closes on
        // its own. Stop once the handle's receiver is gone.
        if tx.is_closed() {
            info!("Config watcher handle dropped, stopping");
            return;
        }
        match rx.recv_timeout(RECV_POLL_INTERVAL) {
            Ok(Ok(events)) => {
                if !touches_file(&events, file) {
                    continue;
                }
                debug!("Config change detected: {}", file.display());
                let event = reload(default_path, env, shared);
                if tx.send(Some(event)).is_err() {
                    info!("Config watcher receiver dropped, stopping");
                    return;
                }
            }
            Ok(Err(e)) => {
                error!("File watcher error: {}", e);
                let _ = tx.send(Some(ConfigChangeEvent::Error(e.to_string())));
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                info!("Config watcher channel closed, stopping");
                return;
            }
        }
    }
}

/// Whether any debounced event refers to the watched file.
fn touches_file(events: &[DebouncedEvent], file: &Path) -> bool {
    events.iter().any(|event| {
        matches!(
            event.kind,
            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
        ) && is_same_file_name(&event.path, file)
    })
}

fn is_same_file_name(changed: &Path, file: &Path) -> bool {
    match (changed.file_name(), file.file_name()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Re-resolve and publish into `shared`. On failure the current value is kept.
fn reload<E: Env + ?Sized>(
    default_path: &Path,
    env: &E,
    shared: &SharedConfig,
) -> ConfigChangeEvent {
    info!("Reloading configuration from disk...");
    match ConfigLoader::load_with_env(default_path, env) {
        Ok(loader) => {
            let config = Arc::new(loader.into_config());
            shared.store(Arc::clone(&config));
            info!("Configuration reloaded successfully");
            ConfigChangeEvent::Reloaded(config)
        }
        Err(e) => {
            warn!("Config reload failed: {}. Keeping current config.", e);
            ConfigChangeEvent::ReloadFailed(e.to_string())
        }
    }
}
