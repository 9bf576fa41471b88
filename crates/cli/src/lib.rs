//! Library interface for the wintail CLI
//!
//! This module exposes the console session for integration testing while
//! keeping argument handling and logging setup in main.rs.

pub mod console;

pub use anyhow::Result;
pub use wintail_core::config::Config;

use anyhow::Context;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::info;
use wintail_actors::{TailUnit, ValidationUnit};
use wintail_watcher::NotifyWatcher;

/// Tail `path` and validate lines read from `input` until `exit` or end of input
///
/// Tail output and validation outcomes are written to `output`, which is
/// handed back once both units have stopped. Failing to open `path` ends the
/// session with an error.
pub async fn run_session<R, W>(path: &Path, config: &Config, input: R, output: W) -> Result<W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (reporter, reports) = mpsc::unbounded_channel();
    let (writer, outcomes) = mpsc::unbounded_channel();
    let console_writer = console::spawn_writer(output, reports, outcomes);

    let watcher = NotifyWatcher::new(config.watcher.clone());
    let mut tail = TailUnit::start(reporter, path, &watcher, &config.tail)
        .with_context(|| format!("Cannot tail {}", path.display()))?;
    let mut validation = ValidationUnit::start(writer, &config.validation);

    info!("Tailing {:?}", tail.path());
    let read_result = console::read_loop(input, &validation).await;

    tail.stop().await?;
    validation.stop().await?;
    // Stopped units have dropped their senders, so the writer drains and finishes
    let output = console_writer
        .await
        .context("Console writer task failed")??;

    read_result?;
    Ok(output)
}
