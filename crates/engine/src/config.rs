//! Game loop configuration from environment variables

use std::env;
use std::time::Duration;

use crate::types::DEFAULT_POLL_US;

/// Settings for [`crate::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    /// Fixed randomizer seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Sleep between loop iterations.
    pub poll_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: None,
            poll_interval: Duration::from_micros(DEFAULT_POLL_US),
        }
    }
}

impl LoopConfig {
    /// Read `FALLING_BLOCKS_SEED` and `FALLING_BLOCKS_POLL_US`.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("FALLING_BLOCKS_SEED").and_then(|s| s.trim().parse().ok());
        let poll_us = lookup("FALLING_BLOCKS_POLL_US")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&us| us > 0)
            .unwrap_or(DEFAULT_POLL_US);

        Self {
            seed,
            poll_interval: Duration::from_micros(poll_us),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
