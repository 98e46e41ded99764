use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Tuning for burst detection and rate limiting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Distinct participants needed for a burst.
    pub threshold: usize,
    /// Time within which `threshold` participants must react.
    pub detection_window_ms: u64,
    /// Minimum time between two bursts of the same emoji.
    pub cooloff_ms: u64,
    /// Bursts allowed within `throttle_window_ms`, across all emoji.
    pub max_bursts: usize,
    pub throttle_window_ms: u64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            detection_window_ms: 4_000,
            cooloff_ms: 2_000,
            max_bursts: 3,
            throttle_window_ms: 4_000,
        }
    }
}

impl BurstConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.max_bursts == 0 {
            return Err(ConfigError::ZeroMaxBursts);
        }
        if self.detection_window_ms == 0 {
            return Err(ConfigError::ZeroWindow("detection_window_ms"));
        }
        if self.throttle_window_ms == 0 {
            return Err(ConfigError::ZeroWindow("throttle_window_ms"));
        }
        Ok(())
    }

    pub fn detection_window(&self) -> Duration {
        Duration::from_millis(self.detection_window_ms)
    }

    pub fn cooloff(&self) -> Duration {
        Duration::from_millis(self.cooloff_ms)
    }

    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_window_ms)
    }
}
