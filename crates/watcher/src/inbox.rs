//! Sending side of a tail unit's inbox

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use wintail_core::TailMessage;

/// Non-blocking sender into a tail unit's inbox
///
/// A change notification that does not fit is recorded in a shared flag
/// instead. The unit checks the flag after every message it processes, so
/// a change is never lost while messages are still queued.
#[derive(Debug, Clone)]
pub struct TailInbox {
    tx: mpsc::Sender<TailMessage>,
    pending_change: Arc<AtomicBool>,
}

impl TailInbox {
    pub fn new(tx: mpsc::Sender<TailMessage>, pending_change: Arc<AtomicBool>) -> Self {
        Self { tx, pending_change }
    }

    /// Post without blocking; returns `false` once the unit has stopped
    pub fn post(&self, message: TailMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(TailMessage::ChangeNotification { path })) => {
                self.defer_change(path)
            }
            Err(TrySendError::Full(message)) => {
                warn!("Tail inbox full, dropping {:?}", message);
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!("Tail inbox closed, event discarded");
                false
            }
        }
    }

    fn defer_change(&self, path: PathBuf) -> bool {
        self.pending_change.store(true, Ordering::SeqCst);
        // Flag set first: if the inbox is still full, a queued message is
        // processed after this point and the unit sees the flag.
        match self.tx.try_send(TailMessage::ChangeNotification { path }) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Tail inbox full, change deferred");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}
