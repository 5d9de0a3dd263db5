//! Rebuild triggers for icon and content changes.

mod watcher;

pub use watcher::{AssetChangeEvent, AssetWatcher, ChangeKind};
