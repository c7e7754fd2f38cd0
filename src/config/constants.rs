//! Environment-overridable settings
//!
//! Values here override `config.yaml` at startup. Unset or unparsable
//! variables leave the file value in place.

use std::path::PathBuf;

use super::types::AppConfig;

/// Config file used when `CONFIG_PATH` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

// =============================================================================
// Startup Overrides
// =============================================================================

/// Path of the YAML configuration file (default: `config.yaml`)
///
/// Environment variable: `CONFIG_PATH`
pub fn config_path() -> PathBuf {
    std::env::var("CONFIG_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// HTTP listen port
///
/// Environment variable: `PORT`
pub fn port_override() -> Option<u16> {
    std::env::var("PORT").ok().and_then(|s| s.trim().parse().ok())
}

/// Poll interval in seconds
///
/// Environment variable: `POLL_INTERVAL_SECS`
pub fn poll_interval_override() -> Option<u64> {
    std::env::var("POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Backpack forward proxy; an empty value disables the proxy.
///
/// Environment variable: `BACKPACK_PROXY_URL`
pub fn backpack_proxy_override() -> Option<Option<String>> {
    let value = std::env::var("BACKPACK_PROXY_URL").ok()?;
    let value = value.trim();
    if value.is_empty() {
        Some(None)
    } else {
        Some(Some(value.to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print the effective configuration (startup logs)
pub fn log_configuration(config: &AppConfig) {
    tracing::info!("=== Monitor Configuration ===");
    tracing::info!("  - Server port: {}", config.server.port);
    tracing::info!("  - Poll interval: {:?}", config.poller.interval());
    tracing::info!("  - Variational stats: {}", config.variational.stats_url);
    tracing::info!("  - Backpack API: {}", config.backpack.base_url);
    tracing::info!(
        "  - Backpack proxy: {}",
        config.backpack.proxy_url.as_deref().unwrap_or("none")
    );
    tracing::info!(
        "  - Backpack fan-out: {} symbols, {} concurrent",
        config.backpack.max_symbols,
        config.backpack.funding_concurrency
    );
    tracing::info!(
        "  - Symbols: {} aliases, {} blocked",
        config.symbols.aliases.len(),
        config.symbols.blocklist.len()
    );
    tracing::info!(
        "  - Thresholds: {} / {} / {}",
        config.recommendation.consider,
        config.recommendation.recommended,
        config.recommendation.strong
    );
    tracing::info!("==============================");
}
