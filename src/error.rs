//! Error types for configuration and replay input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("burst threshold must be at least 1")]
    ZeroThreshold,

    #[error("max bursts must be at least 1")]
    ZeroMaxBursts,

    #[error("{0} must be non-zero")]
    ZeroWindow(&'static str),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid replay file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reaction {index} is older than the one before it")]
    UnsortedTimestamps { index: usize },
}
