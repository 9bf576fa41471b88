//! wintail CLI - tail a file while validating console input
//!
//! This binary provides the command-line interface for the wintail units.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wintail::{run_session, Config};

#[derive(Parser)]
#[command(name = "wintail")]
#[command(about = "Tail a file and validate console input")]
#[command(version)]
struct Cli {
    /// File to tail
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    println!("Type a message to validate it, or '{}' to quit.", wintail::console::EXIT_COMMAND);
    run_session(&cli.file, &config, tokio::io::stdin(), tokio::io::stdout()).await?;
    Ok(())
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wintail={level},wintail_core={level},wintail_watcher={level},wintail_actors={level}"
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
