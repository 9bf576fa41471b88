//! Core types for the wintail message pipeline
//!
//! This crate provides the foundational pieces shared by the tail and
//! validation units:
//!
//! - **Messages**: immutable values exchanged between units
//! - **Configuration**: layered configuration loading
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod messages;

// Re-export main types for convenience
pub use config::{Config, TailConfig, ValidationConfig, WatcherConfig};
pub use error::{Error, Result, ResultExt};
pub use messages::{
    format_watch_error, Continue, ReplyTo, ReporterTarget, TailMessage, ValidationOutcome,
    WriterTarget,
};
