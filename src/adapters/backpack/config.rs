//! Backpack Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Public REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.backpack.exchange";
/// Local forward proxy Backpack traffic is routed through
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:10808";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Funding-rate calls per cycle when no allow-list is given
const DEFAULT_MAX_SYMBOLS: usize = 50;
/// Funding-rate calls in flight at once
const DEFAULT_FUNDING_CONCURRENCY: usize = 8;

/// Configuration for Backpack REST access
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackpackConfig {
    /// REST base URL (no trailing slash)
    pub base_url: String,
    /// Forward proxy URL; `None` connects directly
    pub proxy_url: Option<String>,
    /// Per-request timeout in seconds (each of the three endpoints)
    pub timeout_secs: u64,
    /// Fan-out cap for funding calls without an allow-list
    pub max_symbols: usize,
    /// Bounded concurrency for funding calls
    pub funding_concurrency: usize,
}

impl Default for BackpackConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy_url: Some(DEFAULT_PROXY_URL.to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_symbols: DEFAULT_MAX_SYMBOLS,
            funding_concurrency: DEFAULT_FUNDING_CONCURRENCY,
        }
    }
}

impl BackpackConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("backpack.base_url cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("backpack.timeout_secs must be > 0".to_string()));
        }
        if self.max_symbols == 0 {
            return Err(AppError::Config("backpack.max_symbols must be > 0".to_string()));
        }
        if self.funding_concurrency == 0 {
            return Err(AppError::Config("backpack.funding_concurrency must be > 0".to_string()));
        }
        Ok(())
    }
}
