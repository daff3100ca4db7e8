//! Configuration module
//!
//! Engine configuration is read from the environment with sane defaults.
//! The simulated processing schedule (step size and delay) is a
//! configuration concern, not a correctness one: any monotonic increasing
//! schedule reaching 100 satisfies the lifecycle contract.

use std::env;
use std::time::Duration;

const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;
const DEFAULT_PROGRESS_STEP_PERCENT: u8 = 25;
const DEFAULT_STEP_DELAY_MS: u64 = 250;
const DEFAULT_LIST_LIMIT: usize = 100;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Maximum accepted file size in bytes.
    pub max_file_size_bytes: u64,
    /// Progress increment applied per simulated work step, in percent.
    pub progress_step_percent: u8,
    /// Delay between simulated work steps.
    pub step_delay: Duration,
    /// Default page size for list queries.
    pub list_default_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * 1024 * 1024,
            progress_step_percent: DEFAULT_PROGRESS_STEP_PERCENT,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            list_default_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let max_file_size_mb = env::var("CHATLENS_MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let progress_step_percent = env::var("CHATLENS_PROGRESS_STEP_PERCENT")
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .unwrap_or(DEFAULT_PROGRESS_STEP_PERCENT);

        let step_delay_ms = env::var("CHATLENS_STEP_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_STEP_DELAY_MS);

        let list_default_limit = env::var("CHATLENS_LIST_DEFAULT_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_LIST_LIMIT);

        let config = Self {
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            progress_step_percent,
            step_delay: Duration::from_millis(step_delay_ms),
            list_default_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.progress_step_percent == 0 || self.progress_step_percent > 100 {
            anyhow::bail!(
                "CHATLENS_PROGRESS_STEP_PERCENT must be within 1..=100, got {}",
                self.progress_step_percent
            );
        }
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("CHATLENS_MAX_FILE_SIZE_MB must be greater than zero");
        }
        if self.list_default_limit == 0 {
            anyhow::bail!("CHATLENS_LIST_DEFAULT_LIMIT must be greater than zero");
        }
        Ok(())
    }
}
