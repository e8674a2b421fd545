//! Gateway file watcher for watch mode.
//!
//! # Design Decisions
//! - Watches the parent directory so a file replaced by rename is still seen
//! - Events for other files in that directory are dropped
//! - Bursts of events are collapsed into one reload after a quiet window

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_gateway_config;
use crate::config::schema::GatewayConfig;

/// Quiet period after the last change before the file is reloaded.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Reloads the gateway file whenever it changes on disk.
pub struct GatewayWatcher {
    path: PathBuf,
    debounce: Duration,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl GatewayWatcher {
    /// Returns the watcher and a receiver for freshly loaded configurations.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                debounce: DEFAULT_DEBOUNCE,
                update_tx,
            },
            update_rx,
        )
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Start watching. Must be called from within a tokio runtime.
    ///
    /// The returned handle must be kept alive for as long as events are
    /// wanted; dropping it also ends the reload task.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name: OsString = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| notify::Error::generic("gateway path has no file name"))?;
        let dir = watch_dir(&self.path);

        let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<()>();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_relevant(&event, &file_name) {
                        let _ = signal_tx.send(());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let path = self.path;
        let update_tx = self.update_tx;
        let window = self.debounce;
        tracing::info!(path = ?path, dir = ?dir, debounce_ms = window.as_millis() as u64, "Gateway watcher started");

        tokio::spawn(async move {
            while next_settled(&mut signal_rx, window).await {
                tracing::info!(path = ?path, "Gateway file change detected, reloading");
                match load_gateway_config(&path) {
                    Ok(config) => {
                        if update_tx.send(config).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to reload gateway file: {}. Keeping current tree.", e);
                    }
                }
            }
            tracing::debug!(path = ?path, "Gateway watcher stopped");
        });

        Ok(watcher)
    }
}

/// Directory to watch for `path`; a bare file name means the working directory.
pub fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True for create or modify events that touch `file_name`.
pub fn is_relevant(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name))
}

/// Wait for a change signal, then swallow further signals until `window`
/// passes without one.
///
/// Returns false once every sender is gone and nothing is pending.
pub async fn next_settled(rx: &mut mpsc::UnboundedReceiver<()>, window: Duration) -> bool {
    if rx.recv().await.is_none() {
        return false;
    }

    loop {
        match tokio::time::timeout(window, rx.recv()).await {
            Ok(Some(())) => continue,
            Ok(None) | Err(_) => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, EventKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_relevant_events() {
        let name = OsStr::new("gateway.json");

        let written = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/etc/ocelot/gateway.json",
        );
        assert!(is_relevant(&written, name));

        let replaced = event(EventKind::Create(CreateKind::File), "/etc/ocelot/gateway.json");
        assert!(is_relevant(&replaced, name));
    }

    #[test]
    fn test_irrelevant_events() {
        let name = OsStr::new("gateway.json");

        let sibling = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "/etc/ocelot/other.json",
        );
        assert!(!is_relevant(&sibling, name));

        let read = event(EventKind::Access(AccessKind::Read), "/etc/ocelot/gateway.json");
        assert!(!is_relevant(&read, name));

        let removed = event(EventKind::Remove(RemoveKind::File), "/etc/ocelot/gateway.json");
        assert!(!is_relevant(&removed, name));
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("/etc/ocelot/gateway.json")), PathBuf::from("/etc/ocelot"));
        assert_eq!(watch_dir(Path::new("gateway.json")), PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_burst_settles_into_one_reload() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for _ in 0..5 {
            tx.send(()).unwrap();
        }

        assert!(next_settled(&mut rx, Duration::from_millis(20)).await);
        assert!(rx.try_recv().is_err());

        drop(tx);
        assert!(!next_settled(&mut rx, Duration::from_millis(20)).await);
    }

    #[tokio::test]
    async fn test_path_without_file_name_is_rejected() {
        let (watcher, _updates) = GatewayWatcher::new(Path::new("/"));
        assert!(watcher.run().is_err());
    }
}
