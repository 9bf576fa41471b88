//! Watcher seam and its notify-backed implementation

use crate::events::to_tail_message;
use crate::inbox::TailInbox;
use crate::subscription::Subscription;
use notify::{
    Config as NotifyConfig, Event as NotifyEvent, RecommendedWatcher, RecursiveMode,
    Watcher as NotifyWatcherTrait,
};
use std::path::Path;
use tracing::info;
use wintail_core::error::{Error, Result};
use wintail_core::WatcherConfig;

/// Source of change notifications for a single file
pub trait FileWatcher: Send + Sync {
    /// Start posting `ChangeNotification`/`WatchError` for `full_path` into `target`
    ///
    /// No ordering is promised between this call returning and the first event.
    fn subscribe(&self, target: TailInbox, full_path: &Path) -> Result<Subscription>;
}

/// File watcher backed by the platform's recommended notify backend
#[derive(Debug, Clone, Default)]
pub struct NotifyWatcher {
    config: WatcherConfig,
}

impl NotifyWatcher {
    pub fn new(config: WatcherConfig) -> Self {
        Self { config }
    }
}

impl FileWatcher for NotifyWatcher {
    fn subscribe(&self, target: TailInbox, full_path: &Path) -> Result<Subscription> {
        if full_path.file_name().is_none() {
            return Err(Error::watcher(format!(
                "Cannot watch {full_path:?}: not a file path"
            )));
        }
        // Watch the directory so replaced files keep reporting
        let dir = match full_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let config = NotifyConfig::default()
            .with_poll_interval(self.config.poll_interval())
            .with_compare_contents(self.config.compare_contents);

        let watched = full_path.to_path_buf();
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<NotifyEvent, notify::Error>| {
                if let Some(message) = to_tail_message(res, &watched) {
                    target.post(message);
                }
            },
            config,
        )
        .map_err(|e| Error::watcher(format!("Failed to create watcher: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| Error::watcher(format!("Failed to watch path {dir:?}: {e}")))?;

        info!("Watching {:?}", full_path);
        Ok(Subscription::new(full_path, move || drop(watcher)))
    }
}
