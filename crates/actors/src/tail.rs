//! Tail unit: reports a file's content, then only what gets appended

use crate::cursor::TailCursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};
use wintail_core::error::{Error, Result, ResultExt};
use wintail_core::{format_watch_error, ReporterTarget, TailConfig, TailMessage};
use wintail_watcher::{FileWatcher, Subscription, TailInbox};

/// Single-file tailing unit
///
/// Owns the file handle and cursor for its whole life. Created through
/// [`TailUnit::start`], which hands back a [`TailHandle`].
pub struct TailUnit {
    path: PathBuf,
    cursor: TailCursor,
    reporter: ReporterTarget,
    /// Set by the watcher when a change did not fit in the inbox
    pending_change: Arc<AtomicBool>,
}

impl TailUnit {
    /// Open `path`, capture its snapshot, subscribe to changes and start processing
    ///
    /// The snapshot is enqueued before the watcher is armed, so it is always
    /// the first message the unit processes and the first text the reporter
    /// receives. A change notification queued right behind it covers bytes
    /// appended while the watcher was being armed. Failing to open the file
    /// returns [`Error::Open`]; what to do about it is up to the caller.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<W>(
        reporter: ReporterTarget,
        path: impl AsRef<Path>,
        watcher: &W,
        config: &TailConfig,
    ) -> Result<TailHandle>
    where
        W: FileWatcher + ?Sized,
    {
        let path = path.as_ref();
        let full_path = std::path::absolute(path).map_err(|e| Error::open(path, e))?;

        let mut cursor = TailCursor::open(&full_path, config.strip_bom)?;
        let text = cursor
            .read_to_end()
            .context(format!("Failed to read snapshot of {}", full_path.display()))?;

        // Room for the snapshot and the catch-up change
        let (tx, inbox) = mpsc::channel(config.mailbox_capacity.max(2));
        tx.try_send(TailMessage::SnapshotRead {
            path: full_path.clone(),
            text,
        })
        .map_err(|_| Error::UnitStopped("tail"))?;

        let pending_change = Arc::new(AtomicBool::new(false));
        let target = TailInbox::new(tx, Arc::clone(&pending_change));

        // The handle is dropped here if the subscription fails
        let subscription = watcher.subscribe(target.clone(), &full_path)?;
        target.post(TailMessage::ChangeNotification {
            path: full_path.clone(),
        });
        drop(target);

        let unit = Self {
            path: full_path.clone(),
            cursor,
            reporter,
            pending_change,
        };
        let cancel = CancellationToken::new();
        let task = tokio::spawn(unit.run(inbox, subscription, cancel.clone()));

        info!("Tail unit started for {:?}", full_path);
        Ok(TailHandle {
            path: full_path,
            cancel,
            task: Some(task),
        })
    }

    async fn run(
        mut self,
        mut inbox: mpsc::Receiver<TailMessage>,
        subscription: Subscription,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                message = inbox.recv() => match message {
                    Some(message) => {
                        self.handle(message);
                        if self.pending_change.swap(false, Ordering::SeqCst) {
                            self.read_appended();
                        }
                    }
                    None => {
                        debug!("Inbox for {:?} closed", self.path);
                        break;
                    }
                },
            }
        }

        subscription.unsubscribe();
        inbox.close();
        let mut discarded = 0usize;
        while inbox.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(
                "Discarded {} queued messages for {:?}",
                discarded, self.path
            );
        }
        info!("Tail unit for {:?} stopped", self.path);
    }

    fn handle(&mut self, message: TailMessage) {
        trace!("Tail unit processing {:?}", message);
        match message {
            TailMessage::ChangeNotification { .. } => self.read_appended(),
            TailMessage::WatchError { reason, .. } => {
                error!("Watch error for {:?}: {}", self.path, reason);
                self.report(format_watch_error(&reason));
            }
            // Reported even when empty
            TailMessage::SnapshotRead { text, .. } => self.report(text),
        }
    }

    fn read_appended(&mut self) {
        match self.cursor.read_to_end() {
            Ok(text) if !text.is_empty() => self.report(text),
            Ok(_) => trace!(
                "No new content in {:?} past offset {}",
                self.path,
                self.cursor.offset()
            ),
            Err(e) => {
                error!("Failed to read {:?}: {}", self.path, e);
                self.report(format_watch_error(&e.to_string()));
            }
        }
    }

    fn report(&self, text: String) {
        if self.reporter.send(text).is_err() {
            debug!("Reporter for {:?} is gone", self.path);
        }
    }
}

/// Handle to a running tail unit
#[derive(Debug)]
pub struct TailHandle {
    path: PathBuf,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TailHandle {
    /// Absolute path of the tailed file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the unit and wait until its file handle and watch are released
    ///
    /// Messages still queued are discarded. Calling this again is a no-op.
    pub async fn stop(&mut self) -> Result<()> {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| Error::with_context("Tail unit task failed", e))?;
        }
        Ok(())
    }
}

impl Drop for TailHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
