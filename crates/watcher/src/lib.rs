#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! File change notifications for tail units
//!
//! A [`FileWatcher`] arms an OS-level subscription on one file and posts
//! [`TailMessage`](wintail_core::TailMessage) values into the subscriber's
//! [`TailInbox`]. The returned [`Subscription`] owns the OS resources.
//!
//! # Example
//!
//! ```no_run
//! use wintail_core::WatcherConfig;
//! use wintail_watcher::{FileWatcher, NotifyWatcher, TailInbox};
//! use std::path::Path;
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let watcher = NotifyWatcher::new(WatcherConfig::default());
//! let (tx, mut messages) = tokio::sync::mpsc::channel(64);
//!
//! let inbox = TailInbox::new(tx, Arc::new(AtomicBool::new(false)));
//! let subscription = watcher.subscribe(inbox, Path::new("/var/log/app.log"))?;
//!
//! while let Some(message) = messages.recv().await {
//!     println!("{message:?}");
//! }
//! subscription.unsubscribe();
//! # Ok(())
//! # }
//! ```

// Private implementation modules
mod events;
mod inbox;
mod subscription;
mod watcher;

// Public exports - minimal API surface
pub use inbox::TailInbox;
pub use subscription::Subscription;
pub use watcher::{FileWatcher, NotifyWatcher};
