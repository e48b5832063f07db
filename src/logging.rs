//! File logging for the terminal binary.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so log lines go to a file. Logging stays off unless
//! `FALLING_BLOCKS_LOG_PATH` is set.

use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub path: Option<PathBuf>,
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            level: Level::INFO,
        }
    }
}

impl LogConfig {
    /// Read `FALLING_BLOCKS_LOG_PATH` and `FALLING_BLOCKS_LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup("FALLING_BLOCKS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let level = lookup("FALLING_BLOCKS_LOG_LEVEL")
            .and_then(|s| parse_level(&s))
            .unwrap_or(Level::INFO);
        Self { path, level }
    }

    pub fn enabled(&self) -> bool {
        self.path.is_some()
    }
}

/// Parse a level name (case-insensitive)
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install the global subscriber if a log path is configured.
///
/// Returns whether logging was enabled.
pub fn init(config: &LogConfig) -> Result<bool> {
    let Some(path) = config.path.as_ref() else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;
    Ok(true)
}
