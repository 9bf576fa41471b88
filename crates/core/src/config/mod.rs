//! Configuration for the tail and validation units
//!
//! Values come from hardcoded defaults, an optional TOML file, and
//! `WINTAIL_`-prefixed environment variables, in increasing precedence.

mod defaults;
mod loading;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use defaults::*;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tail unit configuration
    #[serde(default)]
    pub tail: TailConfig,

    /// File watcher configuration
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Validation unit configuration
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Configuration for a tail unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailConfig {
    /// Capacity of the unit's inbox
    #[serde(default = "default_tail_mailbox_capacity")]
    pub mailbox_capacity: usize,

    /// Drop a leading UTF-8 byte order mark from the snapshot
    #[serde(default = "default_strip_bom")]
    pub strip_bom: bool,
}

/// Configuration for the notify-backed file watcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Poll interval in milliseconds when the platform falls back to polling
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Compare file contents when polling instead of only metadata
    #[serde(default)]
    pub compare_contents: bool,
}

/// Configuration for a validation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Capacity of the unit's inbox
    #[serde(default = "default_validation_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_tail_mailbox_capacity(),
            strip_bom: default_strip_bom(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            compare_contents: false,
        }
    }
}

impl WatcherConfig {
    /// Get the poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_validation_mailbox_capacity(),
        }
    }
}

impl Config {
    /// Validates configuration values
    pub fn validate(&self) -> Result<()> {
        if self.tail.mailbox_capacity == 0 {
            return Err(Error::config(
                "Invalid tail mailbox capacity: must be greater than 0",
            ));
        }
        if self.validation.mailbox_capacity == 0 {
            return Err(Error::config(
                "Invalid validation mailbox capacity: must be greater than 0",
            ));
        }
        if self.watcher.poll_interval_ms == 0 {
            return Err(Error::config(
                "Invalid watcher poll interval: must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Default location of the user configuration file
pub fn global_config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| Error::config("Could not determine home directory"))?;
    Ok(PathBuf::from(home).join(".wintail").join("config.toml"))
}
