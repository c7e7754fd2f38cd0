//! Variational Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Public metadata endpoint listing every perpetual with its funding stats
pub const DEFAULT_STATS_URL: &str =
    "https://omni-client-api.prod.ap-northeast-1.variational.io/metadata/stats";

/// Request timeout for the stats endpoint
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for the Variational stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VariationalConfig {
    /// Full URL of the `/metadata/stats` endpoint
    pub stats_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for VariationalConfig {
    fn default() -> Self {
        Self {
            stats_url: DEFAULT_STATS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl VariationalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.stats_url.trim().is_empty() {
            return Err(AppError::Config("variational.stats_url cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("variational.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}
