//! File watching for rebuilds during development.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::{Error, Result};

/// Event indicating an icon or content file changed.
#[derive(Debug, Clone)]
pub struct AssetChangeEvent {
    /// Path to the changed file.
    pub path: PathBuf,
    /// Type of change.
    pub kind: ChangeKind,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was created or modified.
    Modified,
    /// File was removed.
    Removed,
}

type DebouncedEvents =
    std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>;

/// Watches icon directories and content sources.
///
/// Icon directories are watched non-recursively, matching how catalogs are
/// scanned; content directories recursively.
///
/// # Example
///
/// ```ignore
/// let mut watcher = AssetWatcher::new()?;
/// watcher.watch_icons("deps/lucide/icons")?;
/// watcher.watch_content("lib")?;
///
/// loop {
///     if !watcher.wait(Duration::from_secs(1)).is_empty() {
///         run_build(&config)?;
///     }
/// }
/// ```
pub struct AssetWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<DebouncedEvents>,
    watched_paths: HashSet<PathBuf>,
}

impl AssetWatcher {
    /// Create a new watcher.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(Duration::from_millis(100), tx)
            .map_err(|e| Error::HotReload(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_paths: HashSet::new(),
        })
    }

    /// Watch an icon directory.
    pub fn watch_icons(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.watch(path.as_ref(), RecursiveMode::NonRecursive)
    }

    /// Watch a content file or directory.
    pub fn watch_content(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.watch(path.as_ref(), RecursiveMode::Recursive)
    }

    fn watch(&mut self, path: &Path, mode: RecursiveMode) -> Result<()> {
        let path = path.canonicalize().map_err(|e| Error::io(path, e))?;

        if !self.watched_paths.contains(&path) {
            self.debouncer
                .watcher()
                .watch(&path, mode)
                .map_err(|e| Error::HotReload(e.to_string()))?;

            tracing::info!("Watching: {}", path.display());
            self.watched_paths.insert(path);
        }

        Ok(())
    }

    /// Stop watching a path.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = match path.as_ref().canonicalize() {
            Ok(p) => p,
            Err(_) => return Ok(()),
        };

        if self.watched_paths.remove(&path) {
            let _ = self.debouncer.watcher().unwatch(&path);
            tracing::info!("Stopped watching: {}", path.display());
        }

        Ok(())
    }

    /// Collect pending changes without blocking.
    pub fn poll(&mut self) -> Vec<AssetChangeEvent> {
        let mut changes = vec![];

        loop {
            match self.rx.try_recv() {
                Ok(events) => collect_events(events, &mut changes),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("File watcher disconnected");
                    break;
                }
            }
        }

        dedup(changes)
    }

    /// Block up to `timeout` for the first batch, then drain the rest.
    pub fn wait(&mut self, timeout: Duration) -> Vec<AssetChangeEvent> {
        let mut changes = vec![];

        match self.rx.recv_timeout(timeout) {
            Ok(events) => collect_events(events, &mut changes),
            Err(RecvTimeoutError::Timeout) => return changes,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("File watcher disconnected");
                return changes;
            }
        }

        changes.extend(self.poll());
        dedup(changes)
    }

    /// Get the number of watched paths.
    pub fn watched_count(&self) -> usize {
        self.watched_paths.len()
    }
}

fn collect_events(events: DebouncedEvents, changes: &mut Vec<AssetChangeEvent>) {
    match events {
        Ok(events) => {
            for event in events {
                if event.kind != DebouncedEventKind::Any {
                    continue;
                }
                let kind = if event.path.exists() {
                    ChangeKind::Modified
                } else {
                    ChangeKind::Removed
                };
                changes.push(AssetChangeEvent {
                    path: event.path,
                    kind,
                });
            }
        }
        Err(e) => tracing::warn!("File watcher error: {}", e),
    }
}

// Same file may have multiple events
fn dedup(mut changes: Vec<AssetChangeEvent>) -> Vec<AssetChangeEvent> {
    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes.dedup_by(|a, b| a.path == b.path);
    changes
}
