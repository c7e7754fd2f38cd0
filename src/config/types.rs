//! Configuration types for the monitor
//!
//! Every section is optional in YAML; missing sections and fields take the
//! defaults below. Venue sections reuse the adapters' own config structs.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::backpack::BackpackConfig;
use crate::adapters::variational::VariationalConfig;
use crate::core::recommendation::RecommendationThresholds;
use crate::core::symbols::{SymbolReconciler, DEFAULT_ALIASES, DEFAULT_BLOCKLIST};
use crate::error::AppError;

// ============================================================================
// Sections
// ============================================================================

/// HTTP read API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 17010 }
    }
}

/// Poll loop settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollerConfig {
    /// Sleep between the end of one cycle and the start of the next
    pub interval_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Backpack → Variational aliases and suppressed Backpack symbols
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SymbolsConfig {
    pub aliases: BTreeMap<String, String>,
    pub blocklist: Vec<String>,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            blocklist: DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SymbolsConfig {
    pub fn reconciler(&self) -> SymbolReconciler {
        SymbolReconciler::new(
            self.aliases.iter().map(|(k, v)| (k.clone(), v.clone())),
            self.blocklist.iter().cloned(),
        )
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (from, to) in &self.aliases {
            if from.trim().is_empty() || to.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "symbols.aliases: empty symbol in mapping '{}' -> '{}'",
                    from, to
                )));
            }
        }
        if self.blocklist.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::Config(
                "symbols.blocklist cannot contain empty symbols".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration loaded from `config.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub poller: PollerConfig,
    pub variational: VariationalConfig,
    pub backpack: BackpackConfig,
    pub symbols: SymbolsConfig,
    pub recommendation: RecommendationThresholds,
}

impl AppConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), AppError> {
        if self.server.port == 0 {
            return Err(AppError::Config("server.port must be > 0".to_string()));
        }
        if self.poller.interval_secs == 0 {
            return Err(AppError::Config("poller.interval_secs must be > 0".to_string()));
        }
        self.variational.validate()?;
        self.backpack.validate()?;
        self.symbols.validate()?;
        self.recommendation.validate()?;
        Ok(())
    }

    /// Apply `PORT`, `POLL_INTERVAL_SECS` and `BACKPACK_PROXY_URL` overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = super::constants::port_override() {
            self.server.port = port;
        }
        if let Some(secs) = super::constants::poll_interval_override() {
            self.poller.interval_secs = secs;
        }
        if let Some(proxy) = super::constants::backpack_proxy_override() {
            self.backpack.proxy_url = proxy;
        }
    }
}
