// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the engine needs to know about a run travels in one RunConfig
// value that the caller builds (the CLI builds it from flags) and passes in.
// The engine keeps no global settings.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::checker::DEFAULT_TIMEOUT;
use crate::error::ConfigError;

pub const MIN_CONCURRENCY: usize = 1;
pub const MAX_CONCURRENCY: usize = 20;
pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 10;

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    /// Save a checkpoint every this many completed probes
    pub checkpoint_interval: usize,
    /// Per-probe timeout
    pub timeout: Duration,
    /// Load/save checkpoints. When false no checkpoint file is touched.
    pub resume: bool,
    /// Directory checkpoint files are written to
    pub checkpoint_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            resume: true,
            checkpoint_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(ConfigError::Concurrency {
                value: self.concurrency,
                min: MIN_CONCURRENCY,
                max: MAX_CONCURRENCY,
            });
        }
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::CheckpointInterval);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Timeout);
        }
        Ok(())
    }
}
