//! Configuration module for monitor settings and YAML loading
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `ServerConfig`, `PollerConfig`, `SymbolsConfig`)
//! - YAML loading functionality (`load_config`, `load_config_or_default`)
//! - Environment variable overrides
//! - Logging initialization

pub mod constants;
pub mod logging;
mod loader;
mod types;

// Re-export types
pub use types::{AppConfig, PollerConfig, ServerConfig, SymbolsConfig};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str, load_config_or_default};

pub use logging::init_logging;
