//! Message values exchanged between units
//!
//! Every message is an owned value. Units never share mutable state; they
//! only send these to each other's inboxes.

use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};

/// Where a tail unit forwards file text and diagnostics
pub type ReporterTarget = mpsc::UnboundedSender<String>;

/// Where a validation unit sends its classification outcomes
pub type WriterTarget = mpsc::UnboundedSender<ValidationOutcome>;

/// Reply handle carried by each validation request
pub type ReplyTo = oneshot::Sender<Continue>;

/// Messages processed by a tail unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailMessage {
    /// The watched file changed and may have grown
    ChangeNotification { path: PathBuf },
    /// The watcher could not observe the file
    WatchError { path: PathBuf, reason: String },
    /// Full file content captured when the unit started
    SnapshotRead { path: PathBuf, text: String },
}

/// Result of classifying one piece of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No input, or an empty string
    EmptyInput,
    /// Input with an even, non-zero number of characters
    Accepted { text: String },
    /// Input with an odd number of characters
    Rejected { text: String },
}

impl ValidationOutcome {
    /// Console wording for this outcome
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "No input received",
            Self::Accepted { .. } => "Thank you! Message was valid.",
            Self::Rejected { .. } => "Invalid: input had odd number of characters.",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Acknowledgment sent back to the sender of a validation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continue;

/// Diagnostic text forwarded to the reporter for a watcher failure
pub fn format_watch_error(reason: &str) -> String {
    format!("Tail error: {reason}")
}
